//! stashpack-core - Shared types for packaging Stash plugins
//!
//! This crate provides:
//! - [`Version`] and [`resolve`] for picking the next plugin version
//! - [`PluginManifest`] for reading a plugin's YAML manifest
//! - [`PluginDescriptor`] for locating a plugin's source directory
//! - [`PackConfig`] for the repository-level `stashpack.toml`
//! - [`slugify`] for deriving index ids from plugin names

mod config;
mod descriptor;
mod error;
mod manifest;
mod slug;
mod version;

pub use config::PackConfig;
pub use descriptor::{PluginDescriptor, discover_plugins, find_manifest};
pub use error::{CoreError, CoreResult};
pub use manifest::PluginManifest;
pub use slug::slugify;
pub use version::{Version, resolve};
