//! Error types for packaging operations.

use stashpack_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while packaging a plugin.
///
/// Every variant names the plugin (or artifact) it concerns so batch
/// drivers can report one line per failure.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Plugin source directory does not exist.
    #[error("{plugin}: source directory not found: {}", path.display())]
    SourceNotFound { plugin: String, path: PathBuf },

    /// Nothing left to package after filtering.
    #[error("{plugin}: no files to package in {}", path.display())]
    EmptySource { plugin: String, path: PathBuf },

    /// Plugin manifest missing or unreadable.
    #[error("{plugin}: {source}")]
    Manifest { plugin: String, source: CoreError },

    /// I/O error during staging or writing the artifact.
    #[error("{plugin}: I/O error at {}: {source}", path.display())]
    Io {
        plugin: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// Source tree traversal failed.
    #[error("{plugin}: failed to walk source tree: {source}")]
    Walk {
        plugin: String,
        source: walkdir::Error,
    },

    /// ZIP archive error.
    #[error("{plugin}: archive error: {source}")]
    Archive {
        plugin: String,
        source: zip::result::ZipError,
    },
}

impl BuildError {
    /// Name of the plugin or artifact the error concerns.
    pub fn plugin(&self) -> &str {
        match self {
            BuildError::SourceNotFound { plugin, .. }
            | BuildError::EmptySource { plugin, .. }
            | BuildError::Manifest { plugin, .. }
            | BuildError::Io { plugin, .. }
            | BuildError::Walk { plugin, .. }
            | BuildError::Archive { plugin, .. } => plugin,
        }
    }

    /// Whether the failure only concerns this plugin.
    ///
    /// Plugin-scoped failures let a batch carry on with its siblings; the
    /// rest (disk, permissions, archive writer) abort the run.
    pub fn is_plugin_scoped(&self) -> bool {
        matches!(
            self,
            BuildError::SourceNotFound { .. }
                | BuildError::EmptySource { .. }
                | BuildError::Manifest { .. }
        )
    }

    pub(crate) fn io(plugin: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            plugin: plugin.to_string(),
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(plugin: &str, source: zip::result::ZipError) -> Self {
        BuildError::Archive {
            plugin: plugin.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn BuildError___source_not_found___displays_plugin_and_path() {
        let err = BuildError::SourceNotFound {
            plugin: "Missing".to_string(),
            path: PathBuf::from("plugins/Missing"),
        };

        assert_eq!(
            err.to_string(),
            "Missing: source directory not found: plugins/Missing"
        );
    }

    #[test]
    fn BuildError___io___displays_path_and_cause() {
        let err = BuildError::io(
            "Sync",
            "dist/Sync-1.0.0.zip",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        );

        let msg = err.to_string();
        assert!(msg.starts_with("Sync: I/O error at dist/Sync-1.0.0.zip"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn BuildError___manifest___wraps_core_error() {
        let err = BuildError::Manifest {
            plugin: "Sync".to_string(),
            source: CoreError::ManifestNotFound {
                dir: PathBuf::from("plugins/Sync"),
            },
        };

        assert_eq!(
            err.to_string(),
            "Sync: no plugin manifest found in plugins/Sync"
        );
        assert_eq!(err.plugin(), "Sync");
    }

    #[test]
    fn BuildError___plugin_scoped___only_source_and_manifest_problems() {
        let missing = BuildError::SourceNotFound {
            plugin: "a".into(),
            path: PathBuf::new(),
        };
        let empty = BuildError::EmptySource {
            plugin: "a".into(),
            path: PathBuf::new(),
        };
        let io = BuildError::io("a", "x", std::io::Error::other("disk full"));
        let archive = BuildError::archive("a", zip::result::ZipError::FileNotFound);

        assert!(missing.is_plugin_scoped());
        assert!(empty.is_plugin_scoped());
        assert!(!io.is_plugin_scoped());
        assert!(!archive.is_plugin_scoped());
    }
}
