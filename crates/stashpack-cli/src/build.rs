//! Build command implementation

use crate::select::{Selection, select_plugins};
use anyhow::{Context, Result, bail};
use stashpack_bundle::{BuildError, BuildRecord, PackageBuilder};
use stashpack_core::{PackConfig, PluginDescriptor, Version, resolve};
use stashpack_index::{IndexDocument, IndexStore, ManifestLookup, reconcile};
use std::process::ExitCode;

/// Options for one `stashpack build` run
#[derive(Debug, Clone)]
pub struct BuildArgs {
    pub selection: Selection,
    /// `--version`; only valid with a single plugin
    pub version: Option<Version>,
    /// `--bump`: ignore manifest versions
    pub bump: bool,
    pub update_index: bool,
}

/// Outcome of a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<BuildRecord>,
    pub failures: Vec<BuildError>,
    pub index_updated: bool,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the build command
pub fn run(config: &PackConfig, args: &BuildArgs) -> Result<ExitCode> {
    let report = run_batch(config, args)?;

    for record in &report.records {
        println!(
            "✓ {} {} -> {} ({} files, {} bytes)",
            record.plugin_name(),
            record.version(),
            record.artifact_path().display(),
            record.file_count(),
            record.artifact_bytes()
        );
        println!("  sha256: {}", record.content_hash());
    }
    if report.index_updated {
        println!("Index: {}", config.index_file.display());
    }
    for failure in &report.failures {
        eprintln!("error: {failure}");
    }

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "\n{} of {} plugin(s) failed",
            report.failures.len(),
            report.failures.len() + report.records.len()
        );
        Ok(ExitCode::FAILURE)
    }
}

/// Build every selected plugin in turn, then fold the results into the index.
///
/// Failures confined to one plugin are collected and the batch carries on.
/// Anything else aborts before the index is touched.
pub fn run_batch(config: &PackConfig, args: &BuildArgs) -> Result<BatchReport> {
    let names = select_plugins(config, &args.selection)?;
    if args.version.is_some() && names.len() != 1 {
        bail!(
            "--version applies to a single plugin, but {} were selected",
            names.len()
        );
    }

    let store = IndexStore::new(&config.index_file);
    let document = load_index(&store, args.update_index)?;

    let mut builder = PackageBuilder::new(&config.dist_dir);
    if let Some(scratch) = &config.scratch_dir {
        builder = builder.with_scratch_dir(scratch);
    }

    let mut report = BatchReport::default();
    for name in &names {
        let descriptor = PluginDescriptor::in_plugins_dir(&config.plugins_dir, name);
        let version = version_for(&descriptor, args, &document);

        match builder.build(&descriptor, &version) {
            Ok(record) => report.records.push(record),
            Err(e) if e.is_plugin_scoped() => {
                tracing::debug!(plugin = %name, "build failed: {e}");
                report.failures.push(e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Build aborted at plugin {name}"));
            }
        }
    }

    if args.update_index && !report.records.is_empty() {
        let lookup = ManifestLookup::new(&config.plugins_dir);
        let document = reconcile(document, &report.records, &lookup);
        store
            .save(&document)
            .context("Failed to update plugin index")?;
        report.index_updated = true;
    }

    Ok(report)
}

/// An unreadable index is fatal only when it is about to be rewritten.
fn load_index(store: &IndexStore, update_index: bool) -> Result<IndexDocument> {
    match store.load() {
        Ok(document) => Ok(document),
        Err(e) if !update_index => {
            tracing::warn!(
                index = %store.path().display(),
                "ignoring unreadable index, versions start fresh: {e}"
            );
            Ok(IndexDocument::new())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read index {}", store.path().display()))
        }
    }
}

fn version_for(descriptor: &PluginDescriptor, args: &BuildArgs, index: &IndexDocument) -> Version {
    if let Some(version) = args.version {
        return version;
    }

    let manifest_version = if args.bump {
        None
    } else {
        descriptor.read_manifest().ok().and_then(|m| m.version)
    };
    let explicit = manifest_version.as_deref();
    let previous = index.version_of(&descriptor.slug());

    if let Some(requested) = explicit.filter(|v| Version::parse(v).is_none()) {
        tracing::warn!(
            plugin = descriptor.name(),
            requested,
            "ignoring malformed manifest version"
        );
    }

    let version = resolve(explicit, previous.as_deref());
    tracing::debug!(
        plugin = descriptor.name(),
        explicit,
        previous = previous.as_deref(),
        %version,
        "resolved version"
    );
    version
}
