pub mod config;
pub mod cursor;
pub mod index;
pub mod normalize;
pub mod resolve;

pub use config::{FilterConfig, DEFAULT_CUTOFF_DISTANCE};
pub use cursor::RecordCursor;
pub use index::RecordIndex;
pub use normalize::{annotate, FeatureNormalizer};
pub use resolve::{distance_between, LocationResolver, Resolution};

#[cfg(test)]
mod tests;
