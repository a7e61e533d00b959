//! Plugin version parsing and resolution

use crate::error::CoreError;
use std::fmt;
use std::str::FromStr;

/// A `MAJOR.MINOR.PATCH` plugin version
///
/// Components are non-negative integers written without redundant leading
/// zeros, so the [`Display`](fmt::Display) form always equals the text that
/// was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Version used when nothing usable is known about a plugin
    pub const INITIAL: Version = Version::new(1, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string, returning `None` when it is not well formed
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.trim().split('.');
        let major = parse_component(parts.next()?)?;
        let minor = parse_component(parts.next()?)?;
        let patch = parse_component(parts.next()?)?;

        if parts.next().is_some() {
            return None;
        }

        Some(Self::new(major, minor, patch))
    }

    /// The next patch release, or `None` if the patch number would overflow
    pub fn next_patch(self) -> Option<Self> {
        let patch = self.patch.checked_add(1)?;
        Some(Self { patch, ..self })
    }
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s).ok_or_else(|| CoreError::InvalidVersion(s.to_string()))
    }
}

/// Pick the version for the next build of a plugin.
///
/// A well-formed `explicit` version wins as-is. Otherwise a well-formed
/// `previous` version has its patch number incremented. Anything else,
/// including malformed input, yields [`Version::INITIAL`].
pub fn resolve(explicit: Option<&str>, previous: Option<&str>) -> Version {
    if let Some(version) = explicit.and_then(Version::parse) {
        return version;
    }

    previous
        .and_then(Version::parse)
        .and_then(Version::next_patch)
        .unwrap_or(Version::INITIAL)
}
