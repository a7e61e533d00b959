//! Build output record.

use crate::builder::artifact_name;
use stashpack_core::Version;
use std::path::{Path, PathBuf};

/// Outcome of packaging one plugin at one version.
///
/// Created once per build and never modified; the index reconciler copies
/// the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    plugin_name: String,
    version: Version,
    artifact_name: String,
    artifact_path: PathBuf,
    artifact_bytes: u64,
    content_hash: String,
    file_count: usize,
}

impl BuildRecord {
    /// Record an artifact written to `artifact_path`.
    ///
    /// `content_hash` is normalized to lowercase hex.
    pub fn new(
        plugin_name: impl Into<String>,
        version: Version,
        artifact_path: impl Into<PathBuf>,
        artifact_bytes: u64,
        content_hash: impl Into<String>,
        file_count: usize,
    ) -> Self {
        let plugin_name = plugin_name.into();
        Self {
            artifact_name: artifact_name(&plugin_name, &version),
            plugin_name,
            version,
            artifact_path: artifact_path.into(),
            artifact_bytes,
            content_hash: content_hash.into().to_ascii_lowercase(),
            file_count,
        }
    }

    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// `{plugin_name}-{version}.zip`
    pub fn artifact_name(&self) -> &str {
        &self.artifact_name
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    pub fn artifact_bytes(&self) -> u64 {
        self.artifact_bytes
    }

    /// Lowercase hex SHA-256 of the archive bytes.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Number of regular files packed.
    pub fn file_count(&self) -> usize {
        self.file_count
    }
}
