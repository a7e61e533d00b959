//! Plugin packaging for stashpack
//!
//! This crate turns a plugin source directory into a distributable archive:
//! the tree is staged into scratch space without development cruft, then
//! compressed into a byte-for-byte reproducible ZIP whose SHA-256 is
//! recorded alongside it.
//!
//! # Archive Structure
//!
//! ```text
//! PerformerSiteSync-1.0.0.zip
//! └── PerformerSiteSync/
//!     ├── PerformerSiteSync.yml
//!     ├── performer_site_sync.py
//!     └── modules/
//!         └── graphql_client.py
//! ```
//!
//! # Example
//!
//! ```no_run
//! use stashpack_bundle::PackageBuilder;
//! use stashpack_core::{PluginDescriptor, Version};
//!
//! let descriptor = PluginDescriptor::new("PerformerSiteSync", "plugins/PerformerSiteSync");
//! let record = PackageBuilder::new("dist").build(&descriptor, &Version::new(1, 0, 0))?;
//!
//! println!("{} sha256:{}", record.artifact_name(), record.content_hash());
//! # Ok::<(), stashpack_bundle::BuildError>(())
//! ```

mod error;
mod filter;
mod record;
mod stage;

pub mod builder;
pub mod inspect;

pub use builder::{PackageBuilder, artifact_name, compute_sha256, verify_sha256};
pub use error::BuildError;
pub use filter::{DENY_PATTERNS, DenyList};
pub use inspect::{ArtifactSummary, inspect_artifact};
pub use record::BuildRecord;

/// Result type for packaging operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Artifact file extension.
pub const ARTIFACT_EXTENSION: &str = "zip";
