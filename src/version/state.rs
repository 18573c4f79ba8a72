//! Stored result of the most recent update check

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::version::error::StoreError;
use crate::version::types::{Tier, UpdateStatus};

/// Status fields written by the classifier and read by presentation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateState {
    pub patch: UpdateStatus,
    pub minor: UpdateStatus,
    pub major: UpdateStatus,
    /// Error message from the last run, cleared when a run completes
    pub error: Option<String>,
    /// Whether a minor + major pass has ever completed
    pub full_check_done: bool,
    /// RFC 3339 timestamp of the last completed run
    pub last_checked: Option<String>,
}

impl UpdateState {
    pub fn tier(&self, tier: Tier) -> &UpdateStatus {
        match tier {
            Tier::Patch => &self.patch,
            Tier::Minor => &self.minor,
            Tier::Major => &self.major,
        }
    }

    pub fn tier_mut(&mut self, tier: Tier) -> &mut UpdateStatus {
        match tier {
            Tier::Patch => &mut self.patch,
            Tier::Minor => &mut self.minor,
            Tier::Major => &mut self.major,
        }
    }

    /// Tiers that currently have an update, smallest first
    pub fn available(&self) -> impl Iterator<Item = (Tier, &UpdateStatus)> {
        Tier::ALL
            .into_iter()
            .map(move |tier| (tier, self.tier(tier)))
            .filter(|(_, status)| status.available)
    }

    pub fn any_available(&self) -> bool {
        self.available().next().is_some()
    }

    /// Loads the state file, returning the default state if it does not exist
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!("No state file at {:?}, starting fresh", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!("State saved to {:?}", path);
        Ok(())
    }
}
