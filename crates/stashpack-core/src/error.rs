//! Error types for stashpack core operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Error type for manifest, version, and configuration handling
#[derive(Error, Debug)]
pub enum CoreError {
    /// Version string is not `MAJOR.MINOR.PATCH`
    #[error("invalid version: {0:?} (expected MAJOR.MINOR.PATCH)")]
    InvalidVersion(String),

    /// No manifest file in the plugin directory
    #[error("no plugin manifest found in {}", dir.display())]
    ManifestNotFound { dir: PathBuf },

    /// Several candidate manifests and none named after the plugin
    #[error("ambiguous plugin manifest in {}: {}", dir.display(), candidates.join(", "))]
    AmbiguousManifest {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    /// Manifest could not be parsed
    #[error("invalid manifest: {0}")]
    ManifestParse(String),

    /// Configuration file could not be parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading manifests or configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
