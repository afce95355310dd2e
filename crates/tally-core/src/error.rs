//! Error types for tally-core

use std::io;
use thiserror::Error;

/// Storage error type
///
/// Parse failures of the entry document are deliberately absent: the
/// store degrades to an empty collection instead of erroring (see
/// `JsonFileStore::read_all`).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Entry file IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Entry serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
