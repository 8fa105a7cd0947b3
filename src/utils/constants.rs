// src/utils/constants.rs

/// Minimum similarity score (0-100) to accept a province match.
pub const PROVINCE_MATCH_THRESHOLD: f64 = 70.0;

/// Minimum similarity score (0-100) to accept a district match.
pub const DISTRICT_MATCH_THRESHOLD: f64 = 75.0;

/// Minimum similarity score (0-100) to accept a ward match. Wards are the
/// densest level, so near-misses are the most dangerous here.
pub const WARD_MATCH_THRESHOLD: f64 = 83.0;

/// Provider id used when `MAPPING_PROVIDER_ID` is not set.
pub const DEFAULT_PROVIDER_ID: i64 = 3;
