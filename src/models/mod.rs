pub mod core;

pub use core::{CanonicalRegion, GeoLevel, LevelStats, MappingResult, ProviderRegion};
