//! On-disk index persistence

use crate::document::IndexDocument;
use crate::error::{IndexError, IndexResult};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// The index file shared between builds
///
/// There is no locking: concurrent writers race and the last rename wins.
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the index; a missing file is an empty document.
    pub fn load(&self) -> IndexResult<IndexDocument> {
        match fs::read_to_string(&self.path) {
            Ok(text) => IndexDocument::parse(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "index not found, starting empty");
                Ok(IndexDocument::new())
            }
            Err(source) => Err(IndexError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Render `document` and atomically replace the index with it.
    pub fn save(&self, document: &IndexDocument) -> IndexResult<()> {
        let text = document.render()?;
        self.write_with(|out| out.write_all(text.as_bytes()))?;

        tracing::info!(
            path = %self.path.display(),
            entries = document.len(),
            "wrote plugin index"
        );
        Ok(())
    }

    /// Write the index through `write`, publishing only if it succeeds.
    ///
    /// Output goes to a temporary sibling that is flushed and fsync'd before
    /// being renamed over the index, so readers see either the previous
    /// document or the complete new one. On any error the temporary file is
    /// removed and the index is untouched.
    pub fn write_with<F>(&self, write: F) -> IndexResult<()>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let wrap = |source: io::Error| IndexError::Write {
            path: self.path.clone(),
            source,
        };

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(directory).map_err(wrap)?;

        let prefix = format!(
            ".{}.",
            self.path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("index")
        );
        let mut builder = Builder::new();
        builder.prefix(&prefix).suffix(".tmp");
        if let Some(permissions) = published_permissions(&self.path) {
            builder.permissions(permissions);
        }

        let mut file = builder.tempfile_in(directory).map_err(wrap)?;
        write(file.as_file_mut()).map_err(wrap)?;
        file.as_file_mut().flush().map_err(wrap)?;
        file.as_file().sync_all().map_err(wrap)?;
        file.persist(&self.path).map_err(|e| wrap(e.error))?;

        Ok(())
    }
}

/// Keep the current index's permissions; new files are world-readable on Unix.
fn published_permissions(path: &Path) -> Option<fs::Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Some(metadata.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(fs::Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}
