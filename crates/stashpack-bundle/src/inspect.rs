//! Reading built artifacts back.

use crate::builder::compute_sha256;
use crate::{BuildError, BuildResult, DenyList};
use std::collections::BTreeSet;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Entry listing and checksum of an existing artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
    /// Entry names in archive order.
    pub entries: Vec<String>,
}

impl ArtifactSummary {
    /// Distinct first path components across all entries.
    pub fn top_level(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter_map(|name| name.split('/').next())
            .filter(|first| !first.is_empty())
            .collect()
    }

    /// Whether every entry lives under `dir/`.
    pub fn is_rooted_at(&self, dir: &str) -> bool {
        let top = self.top_level();
        top.len() == 1 && top.contains(dir)
    }

    /// Entries that `deny` would have kept out of a fresh build.
    pub fn denied_entries<'a>(&'a self, deny: &DenyList) -> Vec<&'a str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|name| deny.is_denied(Path::new(name)))
            .collect()
    }
}

/// Open an artifact, hash it, and list its entries.
pub fn inspect_artifact(path: impl AsRef<Path>) -> BuildResult<ArtifactSummary> {
    let path = path.as_ref();
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = fs::read(path).map_err(|e| BuildError::io(&label, path, e))?;
    let sha256 = compute_sha256(&bytes);

    let archive =
        ZipArchive::new(Cursor::new(&bytes)).map_err(|e| BuildError::archive(&label, e))?;
    let entries = archive.file_names().map(str::to_string).collect();

    Ok(ArtifactSummary {
        path: path.to_path_buf(),
        bytes: bytes.len() as u64,
        sha256,
        entries,
    })
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, names: &[&str]) {
        let mut zip = ZipWriter::new(fs::File::create(path).unwrap());
        for name in names {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(b"x").unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn inspect_artifact___lists_entries_and_hash() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("A-1.0.0.zip");
        write_zip(&path, &["A/a.py", "A/b.py"]);

        let summary = inspect_artifact(&path).unwrap();

        assert_eq!(summary.entries, vec!["A/a.py", "A/b.py"]);
        assert_eq!(summary.sha256, compute_sha256(&fs::read(&path).unwrap()));
        assert!(summary.is_rooted_at("A"));
    }

    #[test]
    fn ArtifactSummary___two_roots___is_not_rooted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mixed.zip");
        write_zip(&path, &["A/a.py", "B/b.py"]);

        let summary = inspect_artifact(&path).unwrap();

        assert_eq!(summary.top_level().len(), 2);
        assert!(!summary.is_rooted_at("A"));
    }

    #[test]
    fn inspect_artifact___not_a_zip___returns_archive_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fake.zip");
        fs::write(&path, b"plain text").unwrap();

        let err = inspect_artifact(&path).unwrap_err();

        assert!(matches!(err, BuildError::Archive { ref plugin, .. } if plugin == "fake.zip"));
    }

    #[test]
    fn ArtifactSummary___denied_entries___lists_cruft_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("A-1.0.0.zip");
        write_zip(&path, &["A/a.py", "A/__pycache__/a.pyc", "A/run.log"]);

        let summary = inspect_artifact(&path).unwrap();

        assert_eq!(
            summary.denied_entries(&DenyList::standard()),
            vec!["A/__pycache__/a.pyc", "A/run.log"]
        );
    }
}
