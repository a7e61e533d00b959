//! Index entry model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Release timestamp layout used by the plugin manager
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a release timestamp for the index
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// One published plugin
///
/// Field order is part of the plugin manager's format and is kept by
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: String,
    pub name: String,
    pub metadata: EntryMetadata,
    pub version: String,
    pub date: String,
    pub path: String,
    pub sha256: String,
    #[serde(default)]
    pub requires: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub description: String,
}

impl IndexEntry {
    /// Serialize as a single YAML sequence item (`- id: ...`)
    pub(crate) fn to_yaml_item(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(std::slice::from_ref(self))
    }
}
