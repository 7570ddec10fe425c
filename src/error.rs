//! Error types for the geosearch index.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoSearchError {
    /// A query or point was rejected at the boundary (bad radius, non-finite
    /// or out-of-range coordinates).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Tree configuration is unusable, e.g. `max_entries < 2`.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// A structural invariant of the tree does not hold.
    #[error("Corrupt index: {0}")]
    CorruptIndex(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeoSearchError>;
