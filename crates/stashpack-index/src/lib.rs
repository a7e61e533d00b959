//! Plugin index handling for stashpack
//!
//! The published index is a YAML sequence consumed by Stash's plugin
//! manager. This crate provides:
//! - [`IndexEntry`] with the exact field order the plugin manager expects
//! - [`IndexDocument`] which keeps header lines and untouched entries verbatim
//! - [`reconcile`] to fold [`BuildRecord`](stashpack_bundle::BuildRecord)s into a document
//! - [`IndexStore`] for reading the index and replacing it atomically
//!
//! # Index Format
//!
//! ```yaml
//! # Stash plugin index
//! - id: performersitesync
//!   name: Performer Site Sync
//!   metadata:
//!     description: Sync favourite performers and studios
//!   version: 1.0.0
//!   date: 2025-06-01 18:04:11
//!   path: PerformerSiteSync-1.0.0.zip
//!   sha256: 5b0c...e1
//!   requires: []
//! ```

mod document;
mod entry;
mod error;
mod reconcile;
mod store;

pub use document::{DocumentEntry, IndexDocument, Upsert};
pub use entry::{DATE_FORMAT, EntryMetadata, IndexEntry, format_date};
pub use error::{IndexError, IndexResult};
pub use reconcile::{
    DEFAULT_DESCRIPTION, ManifestLookup, MetadataLookup, PluginMetadata, entry_for, reconcile,
    reconcile_at,
};
pub use store::IndexStore;
