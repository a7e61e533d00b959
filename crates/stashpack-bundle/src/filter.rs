//! Development-artifact deny-list.

use glob::{MatchOptions, Pattern};
use std::path::{Component, Path};

/// File and directory name patterns never shipped in an artifact.
///
/// Each pattern is matched against a single path component, so a matching
/// directory is excluded together with everything beneath it.
pub const DENY_PATTERNS: &[&str] = &[
    // compiled bytecode caches
    "__pycache__",
    "*.pyc",
    "*.pyo",
    ".pytest_cache",
    ".mypy_cache",
    // virtual environments and dependency managers
    ".venv",
    "venv",
    "node_modules",
    // logs, local environment overrides, temp files
    "*.log",
    ".env*",
    "*.tmp",
    // version control metadata
    ".git",
    ".svn",
    ".hg",
    ".DS_Store",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled form of [`DENY_PATTERNS`].
#[derive(Debug, Clone)]
pub struct DenyList {
    patterns: Vec<Pattern>,
}

impl DenyList {
    /// The fixed deny-list applied to every plugin.
    pub fn standard() -> Self {
        // The patterns are constants; the tests check that all of them compile.
        let patterns = DENY_PATTERNS
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect();

        Self { patterns }
    }

    /// Whether a single file or directory name is denied.
    pub fn is_denied_name(&self, name: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(name, MATCH_OPTIONS))
    }

    /// Whether any component of a relative path is denied.
    pub fn is_denied(&self, relative: &Path) -> bool {
        relative.components().any(|component| match component {
            Component::Normal(name) => self.is_denied_name(&name.to_string_lossy()),
            _ => false,
        })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for DenyList {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test]
    fn DenyList___standard___compiles_every_pattern() {
        assert_eq!(DenyList::standard().len(), DENY_PATTERNS.len());
    }

    #[test_case("__pycache__" ; "bytecode dir")]
    #[test_case("module.cpython-311.pyc" ; "bytecode file")]
    #[test_case("opt.pyo" ; "optimized bytecode")]
    #[test_case(".venv" ; "dot venv")]
    #[test_case("venv" ; "venv")]
    #[test_case("node_modules" ; "node modules")]
    #[test_case("plugin.log" ; "log file")]
    #[test_case("DEBUG.LOG" ; "upper case log")]
    #[test_case(".env" ; "env file")]
    #[test_case(".env.local" ; "env override")]
    #[test_case("scratch.tmp" ; "temp file")]
    #[test_case(".git" ; "git dir")]
    #[test_case(".DS_Store" ; "finder metadata")]
    fn DenyList___is_denied_name___rejects(name: &str) {
        assert!(DenyList::standard().is_denied_name(name));
    }

    #[test_case("PerformerSiteSync.yml" ; "manifest")]
    #[test_case("graphql_client.py" ; "source")]
    #[test_case("requirements.txt" ; "requirements")]
    #[test_case("environment.md" ; "env prefix without dot")]
    #[test_case("logo.png" ; "log prefix")]
    #[test_case(".github" ; "other dot dir")]
    #[test_case("venv.py" ; "venv prefix")]
    fn DenyList___is_denied_name___keeps(name: &str) {
        assert!(!DenyList::standard().is_denied_name(name));
    }

    #[test]
    fn DenyList___is_denied___matches_nested_component() {
        let deny = DenyList::standard();

        assert!(deny.is_denied(Path::new("modules/__pycache__/utils.cpython-311.pyc")));
        assert!(deny.is_denied(Path::new("ui/node_modules/lib/index.js")));
        assert!(!deny.is_denied(Path::new("modules/utils.py")));
    }
}
