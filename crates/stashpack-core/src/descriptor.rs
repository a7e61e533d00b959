//! Plugin source directories and manifest discovery

use crate::error::{CoreError, CoreResult};
use crate::manifest::PluginManifest;
use crate::slug::slugify;
use std::fs;
use std::path::{Path, PathBuf};

/// Identifies one plugin's source directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    name: String,
    source_dir: PathBuf,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_dir: source_dir.into(),
        }
    }

    /// Descriptor for `plugins_dir/<name>`
    pub fn in_plugins_dir(plugins_dir: &Path, name: &str) -> Self {
        Self::new(name, plugins_dir.join(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Index id derived from the plugin name
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Locate and parse this plugin's manifest
    pub fn read_manifest(&self) -> CoreResult<PluginManifest> {
        let path = find_manifest(&self.source_dir, &self.name)?;
        PluginManifest::from_file(path)
    }
}

/// Find the manifest file for `plugin_name` in `source_dir`.
///
/// `<plugin_name>.yml` (or `.yaml`) at the top level is preferred. Without
/// one, the directory must hold exactly one top-level YAML file.
pub fn find_manifest(source_dir: &Path, plugin_name: &str) -> CoreResult<PathBuf> {
    let mut candidates = Vec::new();

    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if is_yaml(&path) {
            candidates.push(path);
        }
    }
    candidates.sort();

    let named = candidates.iter().find(|path| {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy() == plugin_name)
    });
    if let Some(path) = named {
        return Ok(path.clone());
    }

    match candidates.len() {
        0 => Err(CoreError::ManifestNotFound {
            dir: source_dir.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(CoreError::AmbiguousManifest {
            dir: source_dir.to_path_buf(),
            candidates: candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| ext == "yml" || ext == "yaml")
}

/// List plugin directory names under `plugins_dir`, sorted.
///
/// Hidden directories and those starting with `_` (templates) are skipped,
/// as are directories without a manifest.
pub fn discover_plugins(plugins_dir: &Path) -> CoreResult<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(plugins_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }

        match find_manifest(&entry.path(), &name) {
            Ok(_) => names.push(name),
            Err(e) => tracing::debug!(plugin = %name, "skipping directory: {e}"),
        }
    }

    names.sort();
    Ok(names)
}
