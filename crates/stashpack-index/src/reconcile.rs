//! Folding build records into the index

use crate::document::{IndexDocument, Upsert};
use crate::entry::{EntryMetadata, IndexEntry, format_date};
use chrono::{DateTime, Utc};
use stashpack_bundle::BuildRecord;
use stashpack_core::{PluginDescriptor, slugify};
use std::path::PathBuf;

/// Description used when a manifest has none
pub const DEFAULT_DESCRIPTION: &str = "Stash plugin";

/// Human-readable metadata for an index entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMetadata {
    pub name: String,
    pub description: String,
    pub requires: Vec<String>,
}

impl PluginMetadata {
    /// Metadata used when nothing can be read for `plugin_name`
    pub fn fallback(plugin_name: &str) -> Self {
        Self {
            name: plugin_name.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            requires: Vec::new(),
        }
    }
}

/// Source of display metadata for built plugins
///
/// Lookups never fail; implementations fall back to [`PluginMetadata::fallback`].
pub trait MetadataLookup {
    fn lookup(&self, plugin_name: &str) -> PluginMetadata;
}

impl<F> MetadataLookup for F
where
    F: Fn(&str) -> PluginMetadata,
{
    fn lookup(&self, plugin_name: &str) -> PluginMetadata {
        self(plugin_name)
    }
}

/// Reads metadata from each plugin's own manifest under `plugins_dir`
#[derive(Debug, Clone)]
pub struct ManifestLookup {
    plugins_dir: PathBuf,
}

impl ManifestLookup {
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
        }
    }
}

impl MetadataLookup for ManifestLookup {
    fn lookup(&self, plugin_name: &str) -> PluginMetadata {
        let descriptor = PluginDescriptor::in_plugins_dir(&self.plugins_dir, plugin_name);

        let manifest = match descriptor.read_manifest() {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!(
                    plugin = plugin_name,
                    "manifest metadata unavailable, using defaults: {e}"
                );
                return PluginMetadata::fallback(plugin_name);
            }
        };

        let description = manifest.description.unwrap_or_else(|| {
            tracing::warn!(
                plugin = plugin_name,
                "manifest has no description, using default"
            );
            DEFAULT_DESCRIPTION.to_string()
        });

        PluginMetadata {
            name: manifest.name,
            description,
            requires: manifest.requires,
        }
    }
}

/// Build the index entry for one record
pub fn entry_for(
    record: &BuildRecord,
    metadata: PluginMetadata,
    released: DateTime<Utc>,
) -> IndexEntry {
    IndexEntry {
        id: slugify(record.plugin_name()),
        name: metadata.name,
        metadata: EntryMetadata {
            description: metadata.description,
        },
        version: record.version().to_string(),
        date: format_date(released),
        path: record.artifact_name().to_string(),
        sha256: record.content_hash().to_string(),
        requires: metadata.requires,
    }
}

/// Fold `records` into `document`, stamping entries with the current time.
pub fn reconcile(
    document: IndexDocument,
    records: &[BuildRecord],
    lookup: &impl MetadataLookup,
) -> IndexDocument {
    reconcile_at(document, records, lookup, Utc::now())
}

/// Fold `records` into `document` with a fixed release time.
///
/// Existing entries with a matching id are replaced where they stand; new
/// ones are appended in record order. Everything else is left as it was.
pub fn reconcile_at(
    mut document: IndexDocument,
    records: &[BuildRecord],
    lookup: &impl MetadataLookup,
    released: DateTime<Utc>,
) -> IndexDocument {
    for record in records {
        let entry = entry_for(record, lookup.lookup(record.plugin_name()), released);
        let id = entry.id.clone();
        let version = entry.version.clone();

        match document.upsert(entry) {
            Upsert::Replaced => tracing::info!(%id, %version, "replaced index entry"),
            Upsert::Appended => tracing::info!(%id, %version, "added index entry"),
        }
    }

    document
}
