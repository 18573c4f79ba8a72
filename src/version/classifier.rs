//! Patch / minor / major update classification

use semver::Version;
use tracing::{debug, info, warn};

use crate::config::AutoCheckPolicy;
use crate::version::error::FetchError;
use crate::version::fetcher::PageFetcher;
use crate::version::semver::ReleaseLine;
use crate::version::site::ReleaseSite;
use crate::version::state::UpdateState;
use crate::version::types::{CheckMode, Tier, Trigger, UpdateStatus};

/// Inputs supplied by the host hook that starts a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckRequest {
    pub mode: CheckMode,
    pub trigger: Trigger,
    pub policy: AutoCheckPolicy,
}

/// What a single run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No network access was made
    Skipped,
    /// The run finished; `full` when minor and major tiers were checked too
    Completed { full: bool },
    /// A fetch failed and the remaining tiers were left untouched
    Failed,
}

/// Runs update checks for one installed version and artifact format
pub struct UpdateChecker<F> {
    site: ReleaseSite<F>,
    current: Version,
    suffix: String,
}

impl<F: PageFetcher> UpdateChecker<F> {
    pub fn new(site: ReleaseSite<F>, current: Version, suffix: &str) -> Self {
        Self {
            site,
            current,
            suffix: suffix.to_string(),
        }
    }

    pub fn current(&self) -> &Version {
        &self.current
    }

    /// Runs one check to completion or failure, recording results in `state`.
    ///
    /// Tiers are written as soon as their own lookup succeeds, so a failure
    /// part-way through keeps the tiers already checked this run and leaves
    /// the later ones at whatever the previous run stored.
    pub async fn run(&self, state: &mut UpdateState, request: CheckRequest) -> CheckOutcome {
        if request.mode == CheckMode::PresentOnly {
            return CheckOutcome::Skipped;
        }
        if request.trigger == Trigger::Startup && request.policy == AutoCheckPolicy::None {
            debug!("Startup check disabled");
            return CheckOutcome::Skipped;
        }

        let outcome = match self.check_tiers(state, request).await {
            Ok(full) => {
                state.error = None;
                state.last_checked = Some(chrono::Utc::now().to_rfc3339());
                CheckOutcome::Completed { full }
            }
            Err(e) => {
                warn!("Update check for {} failed: {}", self.current, e);
                state.error = Some(e.to_string());
                CheckOutcome::Failed
            }
        };

        info!(
            "Update check for {} finished: {:?} (patch: {}, minor: {}, major: {})",
            self.current,
            outcome,
            state.patch.available,
            state.minor.available,
            state.major.available
        );
        outcome
    }

    /// Returns whether the minor and major tiers were checked
    async fn check_tiers(
        &self,
        state: &mut UpdateState,
        request: CheckRequest,
    ) -> Result<bool, FetchError> {
        let current_line = ReleaseLine::of(&self.current);

        let patch = self
            .site
            .find_download(&self.current, current_line, &self.suffix)
            .await?;
        *state.tier_mut(Tier::Patch) = UpdateStatus::from_match(patch);

        if request.trigger == Trigger::Startup && request.policy != AutoCheckPolicy::All {
            return Ok(false);
        }

        let lines = self.site.list_available_versions().await?;

        let minor_target = lines
            .iter()
            .rev()
            .find(|line| line.major == current_line.major)
            .copied();
        let minor = match minor_target {
            Some(target) if target != current_line => {
                self.site
                    .find_download(&self.current, target, &self.suffix)
                    .await?
            }
            _ => None,
        };
        *state.tier_mut(Tier::Minor) = UpdateStatus::from_match(minor);

        let major = match lines.last().copied() {
            Some(target) if target != current_line => {
                self.site
                    .find_download(&self.current, target, &self.suffix)
                    .await?
            }
            _ => None,
        };
        let minor_line = state.minor.version.as_ref().map(ReleaseLine::of);
        let major = major.filter(|found| {
            let duplicate = minor_line == Some(ReleaseLine::of(&found.version));
            if duplicate {
                debug!("{} already reported as a minor update", found.version);
            }
            !duplicate
        });
        *state.tier_mut(Tier::Major) = UpdateStatus::from_match(major);

        state.full_check_done = true;
        Ok(true)
    }
}
