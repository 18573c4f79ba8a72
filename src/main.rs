use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use blender_update_check::config::{self, AutoCheckPolicy, DownloadFormat, Preferences};
use blender_update_check::logging;
use blender_update_check::present::{build_popup, menu_label, should_present};
use blender_update_check::version::classifier::{CheckOutcome, CheckRequest, UpdateChecker};
use blender_update_check::version::fetcher::HttpFetcher;
use blender_update_check::version::semver::parse_version;
use blender_update_check::version::site::ReleaseSite;
use blender_update_check::version::state::UpdateState;
use blender_update_check::version::types::{CheckMode, Trigger};

#[derive(Parser)]
#[command(name = "blender-update-check")]
#[command(version, about = "Checks download.blender.org for newer Blender releases")]
struct Cli {
    /// Installed Blender version, e.g. 4.1.0 (defaults to currentVersion in the config)
    #[arg(long, global = true)]
    current: Option<String>,

    /// Preferences file to use instead of the one in the data directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Startup check, as thorough as the autoCheck preference allows
    Startup,
    /// Check for patch, minor and major updates
    Check {
        /// Only print something when an update is found
        #[arg(long)]
        quiet: bool,
    },
    /// Show the result of the last check without checking again
    Status,
    /// Show or change preferences
    Prefs {
        #[arg(long, value_enum)]
        format: Option<DownloadFormat>,
        #[arg(long, value_enum)]
        auto: Option<AutoCheckPolicy>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(&config::log_path()).context("Failed to open log file")?;

    let config_path = cli.config.unwrap_or_else(config::config_path);
    let mut prefs = Preferences::load(&config_path)
        .with_context(|| format!("Failed to load preferences from {}", config_path.display()))?;
    if let Some(current) = cli.current {
        prefs.current_version = Some(current);
    }

    let (mode, trigger) = match cli.command {
        Command::Prefs { format, auto } => {
            return edit_prefs(&config_path, prefs, format, auto);
        }
        Command::Startup => (CheckMode::CheckOnly, Trigger::Startup),
        Command::Check { quiet: true } => (CheckMode::CheckOnly, Trigger::Manual),
        Command::Check { quiet: false } => (CheckMode::CheckAndPresent, Trigger::Manual),
        Command::Status => (CheckMode::PresentOnly, Trigger::Manual),
    };

    let state_path = config::state_path();
    let mut state = UpdateState::load(&state_path)
        .with_context(|| format!("Failed to load state from {}", state_path.display()))?;

    let outcome = if mode == CheckMode::PresentOnly {
        CheckOutcome::Skipped
    } else {
        let outcome = run_check(&prefs, &mut state, mode, trigger)?;
        state
            .save(&state_path)
            .with_context(|| format!("Failed to save state to {}", state_path.display()))?;
        outcome
    };

    if should_present(mode, outcome, &state) {
        if mode == CheckMode::PresentOnly {
            println!("{}", menu_label(&state));
            if let Some(checked) = &state.last_checked {
                println!("Last checked: {}", checked);
            }
        }
        print!("{}", build_popup(&state));
    }

    Ok(())
}

fn run_check(
    prefs: &Preferences,
    state: &mut UpdateState,
    mode: CheckMode,
    trigger: Trigger,
) -> anyhow::Result<CheckOutcome> {
    let current = prefs
        .current_version
        .as_deref()
        .context("No installed version given; pass --current or set currentVersion")?;
    let current =
        parse_version(current).with_context(|| format!("Invalid version '{}'", current))?;

    let fetcher = HttpFetcher::new(prefs.fetch_timeout())?;
    let site = ReleaseSite::new(fetcher, &prefs.release_root);
    let checker = UpdateChecker::new(site, current, prefs.download_format.suffix());
    let request = CheckRequest {
        mode,
        trigger,
        policy: prefs.auto_check,
    };

    info!(
        "Checking {} for updates to {} ({})",
        prefs.release_root,
        checker.current(),
        prefs.download_format.label()
    );

    let outcome = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(checker.run(state, request));
    Ok(outcome)
}

fn edit_prefs(
    path: &std::path::Path,
    mut prefs: Preferences,
    format: Option<DownloadFormat>,
    auto: Option<AutoCheckPolicy>,
) -> anyhow::Result<()> {
    if format.is_some() || auto.is_some() {
        if let Some(format) = format {
            prefs.download_format = format;
        }
        if let Some(auto) = auto {
            prefs.auto_check = auto;
        }
        prefs
            .save(path)
            .with_context(|| format!("Failed to save preferences to {}", path.display()))?;
        info!("Preferences saved to {:?}", path);
    }

    println!(
        "Download format: {} ({})",
        prefs.download_format.label(),
        prefs.download_format.suffix()
    );
    println!("Automatic check: {:?}", prefs.auto_check);
    println!("Release root:    {}", prefs.release_root);
    if let Some(current) = &prefs.current_version {
        println!("Installed:       {}", current);
    }
    Ok(())
}
