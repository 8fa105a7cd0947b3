pub mod db;
pub mod manager;
pub mod normalize;
pub mod similarity;
pub mod unmatched;
