use std::fmt;

use semver::Version;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "4" or "4.1" by padding with zeros.
///
/// Examples:
/// - "4" -> Version(4, 0, 0)
/// - "4.1" -> Version(4, 1, 0)
/// - "4.1.1" -> Version(4, 1, 1)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// A `major.minor` release line, e.g. every 4.1.x build
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseLine {
    pub major: u64,
    pub minor: u64,
}

impl ReleaseLine {
    pub fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    /// The release line a version belongs to
    pub fn of(version: &Version) -> Self {
        Self::new(version.major, version.minor)
    }
}

impl fmt::Display for ReleaseLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
