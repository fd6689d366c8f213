//! Error types for catalog queries

use thiserror::Error;

/// Repository errors
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog could not be loaded; no repository exists
    #[error("Failed to load catalog: {0}")]
    Load(#[from] brickset_formats::Error),

    /// An aggregate needs at least one set
    #[error("Catalog is empty")]
    EmptyDataset,
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
