//! Scratch staging of a plugin source tree.

use crate::filter::DenyList;
use crate::{BuildError, BuildResult};
use stashpack_core::{PluginDescriptor, slugify};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A filtered copy of a plugin tree in a private scratch directory.
///
/// The layout is `<scratch>/<plugin name>/...`. The scratch directory is
/// removed when the value is dropped, whichever way the build ends.
pub(crate) struct StagedTree {
    scratch: TempDir,
    plugin: String,
    file_count: usize,
}

impl StagedTree {
    /// Copy `descriptor`'s source tree into fresh scratch space, skipping
    /// anything matched by `deny`.
    pub(crate) fn stage(
        descriptor: &PluginDescriptor,
        deny: &DenyList,
        scratch_parent: Option<&Path>,
    ) -> BuildResult<Self> {
        let plugin = descriptor.name();
        let source = descriptor.source_dir();

        let prefix = format!("stashpack-{}-", slugify(plugin));
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);

        let scratch = match scratch_parent {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| BuildError::io(plugin, parent, e))?;
                builder
                    .tempdir_in(parent)
                    .map_err(|e| BuildError::io(plugin, parent, e))?
            }
            None => builder
                .tempdir()
                .map_err(|e| BuildError::io(plugin, std::env::temp_dir(), e))?,
        };

        let root = scratch.path().join(plugin);
        fs::create_dir(&root).map_err(|e| BuildError::io(plugin, &root, e))?;

        let walker = WalkDir::new(source)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !deny.is_denied_name(&entry.file_name().to_string_lossy()));

        let mut file_count = 0;
        for entry in walker {
            let entry = entry.map_err(|source| BuildError::Walk {
                plugin: plugin.to_string(),
                source,
            })?;
            let Ok(relative) = entry.path().strip_prefix(source) else {
                continue;
            };
            let target = root.join(relative);
            let file_type = entry.file_type();

            if file_type.is_dir() {
                fs::create_dir_all(&target).map_err(|e| BuildError::io(plugin, &target, e))?;
            } else if file_type.is_file() {
                fs::copy(entry.path(), &target)
                    .map_err(|e| BuildError::io(plugin, entry.path(), e))?;
                file_count += 1;
                tracing::trace!(plugin, file = %relative.display(), "staged");
            } else {
                tracing::warn!(plugin, path = %relative.display(), "skipping non-regular file");
            }
        }

        tracing::debug!(
            plugin,
            files = file_count,
            scratch = %scratch.path().display(),
            "staged source tree"
        );

        Ok(Self {
            scratch,
            plugin: plugin.to_string(),
            file_count,
        })
    }

    /// Scratch directory; archive paths are relative to it.
    pub(crate) fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }

    /// The archive's single top-level directory.
    pub(crate) fn root(&self) -> PathBuf {
        self.scratch.path().join(&self.plugin)
    }

    pub(crate) fn file_count(&self) -> usize {
        self.file_count
    }
}
