//! Plugin manifest parsing

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// The subset of a Stash plugin manifest that packaging reads
///
/// Only `name` is required. Execution directives (`exec`, `interface`,
/// `tasks`, `hooks`, `settings`, `ui`) are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginManifest {
    pub name: String,

    #[serde(default, deserialize_with = "scalar_text")]
    pub description: Option<String>,

    /// Kept as text so an unquoted `version: 1.0` still loads
    #[serde(default, deserialize_with = "scalar_text")]
    pub version: Option<String>,

    /// Index ids of plugins this one depends on
    #[serde(default)]
    pub requires: Vec<String>,
}

impl PluginManifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        Self::parse(&content)
            .map_err(|e| CoreError::ManifestParse(format!("{}: {e}", path.display())))
    }

    /// Parse manifest from YAML text
    pub fn parse(content: &str) -> CoreResult<Self> {
        let manifest: PluginManifest =
            serde_yaml::from_str(content).map_err(|e| CoreError::ManifestParse(e.to_string()))?;

        if manifest.name.trim().is_empty() {
            return Err(CoreError::ManifestParse(
                "plugin name cannot be empty".to_string(),
            ));
        }

        Ok(manifest)
    }
}

/// Read any YAML scalar as text; blank strings, nulls and non-scalars become `None`
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;

    let text = match value {
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    };

    Ok(text
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
