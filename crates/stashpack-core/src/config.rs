//! Repository configuration (`stashpack.toml`)

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Packaging configuration for a plugin repository
///
/// Every field has a default, so an absent or empty `stashpack.toml` yields
/// the conventional `plugins/` + `dist/` + `index.yml` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackConfig {
    /// Directory holding one subdirectory per plugin
    #[serde(default = "default_plugins_dir")]
    pub plugins_dir: PathBuf,

    /// Output directory for built archives
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Published plugin index
    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,

    /// Plugins built when no selector is given (empty means all)
    #[serde(default)]
    pub default_plugins: Vec<String>,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Parent directory for build scratch space (system temp dir when unset)
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

fn default_plugins_dir() -> PathBuf {
    PathBuf::from("plugins")
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_index_file() -> PathBuf {
    PathBuf::from("index.yml")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            plugins_dir: default_plugins_dir(),
            dist_dir: default_dist_dir(),
            index_file: default_index_file(),
            default_plugins: Vec::new(),
            log_level: default_log_level(),
            scratch_dir: None,
        }
    }
}

impl PackConfig {
    /// Conventional configuration file name
    pub const FILE_NAME: &'static str = "stashpack.toml";

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Load configuration from `path`, rebasing relative paths onto its directory.
    ///
    /// A missing file is not an error; defaults are rebased the same way.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let base = path.parent().unwrap_or_else(|| Path::new(""));

        let config = match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content)
                .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no configuration file, using defaults");
                Self::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(config.rebase(base))
    }

    /// Resolve relative paths against `root`
    pub fn rebase(mut self, root: &Path) -> Self {
        self.plugins_dir = root.join(&self.plugins_dir);
        self.dist_dir = root.join(&self.dist_dir);
        self.index_file = root.join(&self.index_file);
        self.scratch_dir = self.scratch_dir.map(|dir| root.join(dir));
        self
    }
}
