//! Common types shared by the matcher, classifier and presentation layers

use semver::Version;
use serde::{Deserialize, Serialize};

/// A downloadable artifact newer than the baseline it was matched against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadMatch {
    pub version: Version,
    pub url: String,
}

impl DownloadMatch {
    /// Last path segment of the artifact URL
    pub fn file_name(&self) -> &str {
        file_name(&self.url)
    }
}

pub(crate) fn file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Granularity at which an update is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Patch,
    Minor,
    Major,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Patch, Tier::Minor, Tier::Major];

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Patch => "patch",
            Tier::Minor => "minor",
            Tier::Major => "major",
        }
    }
}

/// Per-tier result of the last check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateStatus {
    pub available: bool,
    pub version: Option<Version>,
    pub link: Option<String>,
}

impl UpdateStatus {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn from_match(found: Option<DownloadMatch>) -> Self {
        match found {
            Some(DownloadMatch { version, url }) => Self {
                available: true,
                version: Some(version),
                link: Some(url),
            },
            None => Self::unavailable(),
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.link.as_deref().map(file_name)
    }
}

/// What a check invocation should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Run the network check; present only if an update turns up
    CheckOnly,
    /// Run the network check and always present the result
    CheckAndPresent,
    /// Present the stored result without touching the network
    PresentOnly,
}

/// Which host hook started the check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Startup,
    Manual,
}
