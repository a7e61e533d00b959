//! Inspect command implementation

use anyhow::{Context, Result};
use stashpack_bundle::{DenyList, inspect_artifact};
use std::path::Path;
use std::process::ExitCode;

/// Run the inspect command
pub fn run(artifact: &Path) -> Result<ExitCode> {
    let summary = inspect_artifact(artifact)
        .with_context(|| format!("Failed to read artifact {}", artifact.display()))?;

    println!("Artifact: {}", summary.path.display());
    println!("Size:     {} bytes", summary.bytes);
    println!("SHA256:   {}", summary.sha256);

    let top_level = summary.top_level();
    if top_level.len() != 1 {
        println!(
            "Warning:  expected one top-level directory, found {}",
            top_level.len()
        );
    }

    let denied = summary.denied_entries(&DenyList::standard());
    if !denied.is_empty() {
        println!(
            "Warning:  {} entries match the exclusion list: {}",
            denied.len(),
            denied.join(", ")
        );
    }

    println!("Entries:  {}", summary.entries.len());
    for name in &summary.entries {
        println!("  {name}");
    }

    Ok(ExitCode::SUCCESS)
}
