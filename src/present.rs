//! Popup rendering from stored check results
//!
//! The checker never prints anything itself; hooks decide whether to show a
//! popup with [`should_present`] and build one from the stored state with
//! [`build_popup`].

use std::fmt;

use crate::version::classifier::CheckOutcome;
use crate::version::state::UpdateState;
use crate::version::types::CheckMode;

pub const TITLE_AVAILABLE: &str = "Update available";
pub const TITLE_UNAVAILABLE: &str = "No update needed";
pub const TITLE_FAILED: &str = "Update check failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupItem {
    Label(String),
    Link { text: String, url: String },
    /// Follow-up the user can take, e.g. running a more thorough check
    Action { text: String, command: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub items: Vec<PopupItem>,
}

/// `CheckOnly` runs stay silent unless they turned up an update
pub fn should_present(mode: CheckMode, outcome: CheckOutcome, state: &UpdateState) -> bool {
    match mode {
        CheckMode::CheckAndPresent | CheckMode::PresentOnly => true,
        CheckMode::CheckOnly => {
            matches!(outcome, CheckOutcome::Completed { .. }) && state.any_available()
        }
    }
}

pub fn build_popup(state: &UpdateState) -> Popup {
    let mut items = Vec::new();

    let title = if let Some(error) = &state.error {
        items.push(PopupItem::Label(error.clone()));
        TITLE_FAILED
    } else if state.any_available() {
        TITLE_AVAILABLE
    } else {
        items.push(PopupItem::Label(
            if state.full_check_done {
                "You are running the latest version of Blender"
            } else {
                "You are running the latest patch for this version of Blender"
            }
            .to_string(),
        ));
        TITLE_UNAVAILABLE
    };

    // Links survive a failed run so earlier findings stay visible
    for (tier, status) in state.available() {
        let (Some(file_name), Some(url)) = (status.file_name(), status.link.as_ref()) else {
            continue;
        };
        items.push(PopupItem::Link {
            text: format!("{} ({} update)", file_name, tier.label()),
            url: url.clone(),
        });
    }

    if !state.full_check_done {
        items.push(PopupItem::Action {
            text: "Check for minor and major releases".to_string(),
            command: "blender-update-check check".to_string(),
        });
    }

    Popup {
        title: title.to_string(),
        items,
    }
}

/// Single-line summary for a host menu entry
pub fn menu_label(state: &UpdateState) -> String {
    state
        .available()
        .find_map(|(_, status)| status.version.as_ref())
        .map_or_else(
            || "Check for Updates…".to_string(),
            |version| format!("Update to Blender {}…", version),
        )
}

impl fmt::Display for Popup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for item in &self.items {
            match item {
                PopupItem::Label(text) => writeln!(f, "  {}", text)?,
                PopupItem::Link { text, url } => writeln!(f, "  {}\n    {}", text, url)?,
                PopupItem::Action { text, command } => writeln!(f, "  {}: {}", text, command)?,
            }
        }
        Ok(())
    }
}
