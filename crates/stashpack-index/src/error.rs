//! Error types for index operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors raised while reading, reconciling, or writing the plugin index
#[derive(Error, Debug)]
pub enum IndexError {
    /// An entry block in the index could not be understood
    #[error("index parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The index file exists but could not be read
    #[error("failed to read index {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the reconciled index failed; the previous file is unchanged
    #[error("failed to write index {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An entry could not be serialized
    #[error("failed to serialize index entry: {0}")]
    Serialize(String),
}
