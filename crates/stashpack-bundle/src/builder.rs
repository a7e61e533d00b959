//! Artifact creation.
//!
//! The [`PackageBuilder`] stages a plugin tree, compresses it into a
//! reproducible ZIP in the dist directory, and returns a [`BuildRecord`].

use crate::filter::DenyList;
use crate::stage::StagedTree;
use crate::{ARTIFACT_EXTENSION, BuildError, BuildRecord, BuildResult};
use sha2::{Digest, Sha256};
use stashpack_core::{PluginDescriptor, Version};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

const FILE_MODE: u32 = 0o644;
const DIR_MODE: u32 = 0o755;

/// Builder for plugin artifacts.
///
/// # Example
///
/// ```no_run
/// use stashpack_bundle::PackageBuilder;
/// use stashpack_core::{PluginDescriptor, Version};
///
/// let builder = PackageBuilder::new("dist").with_scratch_dir("target/scratch");
/// let descriptor = PluginDescriptor::new("TagGraph", "plugins/TagGraph");
///
/// let record = builder.build(&descriptor, &Version::new(0, 2, 0))?;
/// assert_eq!(record.artifact_name(), "TagGraph-0.2.0.zip");
/// # Ok::<(), stashpack_bundle::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    dist_dir: PathBuf,
    scratch_dir: Option<PathBuf>,
    deny: DenyList,
}

impl PackageBuilder {
    /// Create a builder writing artifacts into `dist_dir`.
    #[must_use]
    pub fn new(dist_dir: impl Into<PathBuf>) -> Self {
        Self {
            dist_dir: dist_dir.into(),
            scratch_dir: None,
            deny: DenyList::standard(),
        }
    }

    /// Stage builds under `dir` instead of the system temp directory.
    #[must_use]
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Where the artifact for `plugin` at `version` is written.
    pub fn artifact_path(&self, plugin: &str, version: &Version) -> PathBuf {
        self.dist_dir.join(artifact_name(plugin, version))
    }

    /// Package one plugin.
    ///
    /// Any previous artifact with the same name is overwritten. The scratch
    /// copy is removed before this returns, on success and on failure.
    pub fn build(
        &self,
        descriptor: &PluginDescriptor,
        version: &Version,
    ) -> BuildResult<BuildRecord> {
        let plugin = descriptor.name();
        let source = descriptor.source_dir();

        if !is_single_component(plugin) || !source.is_dir() {
            return Err(BuildError::SourceNotFound {
                plugin: plugin.to_string(),
                path: source.to_path_buf(),
            });
        }

        let staged = StagedTree::stage(descriptor, &self.deny, self.scratch_dir.as_deref())?;
        if staged.file_count() == 0 {
            return Err(BuildError::EmptySource {
                plugin: plugin.to_string(),
                path: source.to_path_buf(),
            });
        }

        descriptor
            .read_manifest()
            .map_err(|source| BuildError::Manifest {
                plugin: plugin.to_string(),
                source,
            })?;

        let bytes = write_archive(plugin, &staged)?;
        let file_count = staged.file_count();
        drop(staged);

        fs::create_dir_all(&self.dist_dir)
            .map_err(|e| BuildError::io(plugin, &self.dist_dir, e))?;
        let artifact_path = self.artifact_path(plugin, version);
        fs::write(&artifact_path, &bytes).map_err(|e| BuildError::io(plugin, &artifact_path, e))?;

        let content_hash = compute_sha256(&bytes);
        tracing::info!(
            plugin,
            %version,
            artifact = %artifact_path.display(),
            bytes = bytes.len(),
            files = file_count,
            sha256 = %content_hash,
            "built artifact"
        );

        Ok(BuildRecord::new(
            plugin,
            *version,
            artifact_path,
            bytes.len() as u64,
            content_hash,
            file_count,
        ))
    }
}

/// Artifact file name for `plugin` at `version`.
pub fn artifact_name(plugin: &str, version: &Version) -> String {
    format!("{plugin}-{version}.{ARTIFACT_EXTENSION}")
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Compress the staged tree into ZIP bytes.
///
/// Entries are emitted in sorted order with fixed timestamps and modes, so
/// identical trees always produce identical bytes.
fn write_archive(plugin: &str, staged: &StagedTree) -> BuildResult<Vec<u8>> {
    let base = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    let file_options = base.unix_permissions(FILE_MODE);
    let dir_options = base.unix_permissions(DIR_MODE);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in WalkDir::new(staged.root()).sort_by_file_name() {
        let entry = entry.map_err(|source| BuildError::Walk {
            plugin: plugin.to_string(),
            source,
        })?;
        let Ok(relative) = entry.path().strip_prefix(staged.scratch_path()) else {
            continue;
        };
        let name = archive_path(relative);

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{name}/"), dir_options)
                .map_err(|e| BuildError::archive(plugin, e))?;
        } else {
            let contents =
                fs::read(entry.path()).map_err(|e| BuildError::io(plugin, entry.path(), e))?;
            zip.start_file(name, file_options)
                .map_err(|e| BuildError::archive(plugin, e))?;
            zip.write_all(&contents)
                .map_err(|e| BuildError::io(plugin, entry.path(), e))?;
        }
    }

    let cursor = zip.finish().map_err(|e| BuildError::archive(plugin, e))?;
    Ok(cursor.into_inner())
}

/// Relative path with `/` separators, as stored in the archive.
fn archive_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Compute SHA256 hash of data and return as hex string.
pub fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Verify SHA256 checksum of data against a lowercase hex digest.
pub fn verify_sha256(data: &[u8], expected: &str) -> bool {
    compute_sha256(data) == expected
}
