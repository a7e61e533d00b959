//! Choosing which plugins a build covers

use anyhow::{Context, Result, bail};
use stashpack_core::{PackConfig, discover_plugins};

/// Plugin selection requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// `--plugin NAME`, in the order given
    Named(Vec<String>),
    /// `--all`
    All,
    /// Nothing given: the configured defaults, or every plugin
    Default,
}

impl Selection {
    pub fn from_flags(plugins: Vec<String>, all: bool) -> Self {
        if all {
            Self::All
        } else if plugins.is_empty() {
            Self::Default
        } else {
            Self::Named(plugins)
        }
    }
}

/// Resolve `selection` to plugin names in build order, without duplicates.
pub fn select_plugins(config: &PackConfig, selection: &Selection) -> Result<Vec<String>> {
    let names = match selection {
        Selection::Named(names) => names.clone(),
        Selection::Default if !config.default_plugins.is_empty() => config.default_plugins.clone(),
        Selection::All | Selection::Default => discover_plugins(&config.plugins_dir)
            .with_context(|| {
                format!(
                    "Failed to list plugins in {}",
                    config.plugins_dir.display()
                )
            })?,
    };

    let mut selected: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if selected.contains(&name) {
            tracing::debug!(plugin = %name, "plugin selected twice, building once");
            continue;
        }
        selected.push(name);
    }

    if selected.is_empty() {
        bail!(
            "No plugins selected (none found in {})",
            config.plugins_dir.display()
        );
    }

    Ok(selected)
}
