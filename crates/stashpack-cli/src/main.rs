//! stashpack CLI - Stash plugin packaging tool
//!
//! Commands:
//! - `stashpack build` - Package plugins into `dist/` and optionally update the index
//! - `stashpack verify` - Check index checksums against the built artifacts
//! - `stashpack inspect` - List the contents and checksum of an artifact

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use stashpack_core::{PackConfig, Version};
use std::path::PathBuf;
use std::process::ExitCode;

mod build;
mod inspect;
mod logging;
mod select;
mod verify;

#[derive(Parser)]
#[command(name = "stashpack")]
#[command(author, version, about = "Package Stash plugins and maintain the plugin index", long_about = None)]
struct Cli {
    /// Path to stashpack.toml (default: ./stashpack.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build plugin archives
    Build {
        /// Plugin to build (repeatable; default: configured default plugins)
        #[arg(short, long = "plugin", value_name = "NAME")]
        plugins: Vec<String>,

        /// Build every plugin directory
        #[arg(short, long, conflicts_with = "plugins")]
        all: bool,

        /// Version to build (single plugin only; default: manifest version)
        #[arg(long = "version", value_name = "X.Y.Z")]
        set_version: Option<Version>,

        /// Ignore manifest versions and bump the published patch version
        #[arg(short, long, conflicts_with = "set_version")]
        bump: bool,

        /// Fold the built artifacts into the plugin index
        #[arg(short, long)]
        update_index: bool,
    },

    /// Check every index entry against its artifact in dist
    Verify,

    /// Show the entries and checksum of a built artifact
    Inspect {
        /// Path to the artifact
        artifact: PathBuf,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(PackConfig::FILE_NAME));
    let config = PackConfig::load(&config_path)
        .with_context(|| format!("Failed to load configuration: {}", config_path.display()))?;

    logging::init(cli.verbose, &config.log_level);

    match cli.command {
        Commands::Build {
            plugins,
            all,
            set_version,
            bump,
            update_index,
        } => build::run(
            &config,
            &build::BuildArgs {
                selection: select::Selection::from_flags(plugins, all),
                version: set_version,
                bump,
                update_index,
            },
        ),
        Commands::Verify => verify::run(&config),
        Commands::Inspect { artifact } => inspect::run(&artifact),
    }
}
