use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("record id not found: {id:?}")]
    KeyNotFound { id: Box<str> },

    #[error("invalid location: start {start} is greater than end {end}")]
    InvalidLocation { start: usize, end: usize },

    #[error("invalid strand: {strand} (must be -1 or 1)")]
    InvalidStrand { strand: i8 },

    #[error("location must have at least one part")]
    EmptyLocation,

    #[error("feature type must not be empty")]
    InvalidFeatureType,

    #[error("invalid cutoff distance: {cutoff} (must be > 0)")]
    InvalidCutoff { cutoff: usize },

    #[error("record source error: {0}")]
    Source(String),
}

pub type FilterResult<T> = Result<T, FilterError>;
