//! Verify command implementation

use anyhow::{Context, Result};
use stashpack_bundle::verify_sha256;
use stashpack_core::PackConfig;
use stashpack_index::IndexStore;
use std::fs;
use std::process::ExitCode;

/// Why an index entry does not match `dist/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// The artifact named by `path` is not in the dist directory
    Missing,
    /// The artifact exists but hashes differently
    Checksum,
    /// The entry could not be read from the index
    Unreadable(String),
}

/// One entry that failed verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub id: String,
    pub path: String,
    pub mismatch: Mismatch,
}

/// Run the verify command
pub fn run(config: &PackConfig) -> Result<ExitCode> {
    let (checked, findings) = check(config)?;

    for finding in &findings {
        let reason = match &finding.mismatch {
            Mismatch::Missing => "artifact missing".to_string(),
            Mismatch::Checksum => "sha256 mismatch".to_string(),
            Mismatch::Unreadable(message) => message.clone(),
        };
        eprintln!("error: {}: {} ({reason})", finding.id, finding.path);
    }

    if findings.is_empty() {
        println!("✓ {checked} index entries match {}", config.dist_dir.display());
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("\n{} of {checked} index entries failed verification", findings.len());
        Ok(ExitCode::FAILURE)
    }
}

/// Compare every index entry against its artifact; returns the number checked.
pub fn check(config: &PackConfig) -> Result<(usize, Vec<Finding>)> {
    let store = IndexStore::new(&config.index_file);
    let document = store
        .load()
        .with_context(|| format!("Failed to read index {}", store.path().display()))?;

    let mut findings = Vec::new();
    for item in document.entries() {
        let entry = match item.to_entry() {
            Ok(entry) => entry,
            Err(e) => {
                findings.push(Finding {
                    id: item.id().to_string(),
                    path: String::new(),
                    mismatch: Mismatch::Unreadable(e.to_string()),
                });
                continue;
            }
        };

        let artifact = config.dist_dir.join(&entry.path);
        let mismatch = match fs::read(&artifact) {
            Ok(bytes) if verify_sha256(&bytes, &entry.sha256) => None,
            Ok(_) => Some(Mismatch::Checksum),
            Err(_) => Some(Mismatch::Missing),
        };
        tracing::debug!(
            id = %entry.id,
            artifact = %artifact.display(),
            ok = mismatch.is_none(),
            "checked entry"
        );

        if let Some(mismatch) = mismatch {
            findings.push(Finding {
                id: entry.id,
                path: entry.path,
                mismatch,
            });
        }
    }

    Ok((document.len(), findings))
}
