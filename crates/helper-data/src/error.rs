use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the JSON documents.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A document exists but could not be read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid JSON.
    #[error("Failed to parse JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A document is valid JSON but neither a list nor an object of records.
    #[error("Unexpected layout in {path}: expected a list of records, found {found}")]
    UnexpectedLayout { path: PathBuf, found: &'static str },

    /// Records could not be serialized.
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout the persistence layer.
pub type Result<T> = std::result::Result<T, StoreError>;
