use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::version::error::StoreError;

// =============================================================================
// Constants
// =============================================================================

/// Root of the official release file tree
pub const DEFAULT_RELEASE_ROOT: &str = "http://download.blender.org/release";

/// Timeout for each page fetch in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

const APP_DIR: &str = "blender-update-check";

/// Artifact flavour to suggest, identified by its filename suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DownloadFormat {
    LinuxX64,
    MacosArm64,
    MacosX64,
    WindowsMsi,
    WindowsMsix,
    WindowsZip,
}

impl DownloadFormat {
    /// Filename ending on the release site, e.g. `-linux-x64.tar.xz`
    pub fn suffix(&self) -> &'static str {
        match self {
            DownloadFormat::LinuxX64 => "-linux-x64.tar.xz",
            DownloadFormat::MacosArm64 => "-macos-arm64.dmg",
            DownloadFormat::MacosX64 => "-macos-x64.dmg",
            DownloadFormat::WindowsMsi => "-windows-x64.msi",
            DownloadFormat::WindowsMsix => "-windows-x64.msix",
            DownloadFormat::WindowsZip => "-windows-x64.zip",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DownloadFormat::LinuxX64 => "Linux",
            DownloadFormat::MacosArm64 => "MacOS ARM",
            DownloadFormat::MacosX64 => "MacOS Intel",
            DownloadFormat::WindowsMsi => "Windows MSI",
            DownloadFormat::WindowsMsix => "Windows MSIX",
            DownloadFormat::WindowsZip => "Windows ZIP",
        }
    }

    /// Format matching the platform this binary was built for
    pub fn for_current_platform() -> Self {
        match (std::env::consts::OS, std::env::consts::ARCH) {
            ("linux", _) => DownloadFormat::LinuxX64,
            ("macos", "aarch64") => DownloadFormat::MacosArm64,
            ("windows", _) => DownloadFormat::WindowsZip,
            _ => DownloadFormat::MacosX64,
        }
    }
}

impl Default for DownloadFormat {
    fn default() -> Self {
        Self::for_current_platform()
    }
}

/// How far the startup check goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AutoCheckPolicy {
    /// No check on startup
    None,
    /// Only look for a newer patch of the running release line
    #[default]
    #[serde(rename = "patch")]
    #[value(name = "patch")]
    PatchOnly,
    /// Look for patch, minor and major updates
    All,
}

/// Persisted user preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub download_format: DownloadFormat,
    pub auto_check: AutoCheckPolicy,
    pub release_root: String,
    pub fetch_timeout_secs: u64,
    /// Installed Blender version, used when none is given on the command line
    pub current_version: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            download_format: DownloadFormat::default(),
            auto_check: AutoCheckPolicy::default(),
            release_root: DEFAULT_RELEASE_ROOT.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            current_version: None,
        }
    }
}

impl Preferences {
    /// Loads preferences, falling back to defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
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
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Returns the path to the data directory for blender-update-check.
/// Uses $XDG_DATA_HOME/blender-update-check if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/blender-update-check,
/// or ./blender-update-check if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the preferences file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the path to the stored check state.
pub fn state_path() -> PathBuf {
    data_dir().join("state.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("blender-update-check.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn preferences_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<Preferences>(json!({
            "downloadFormat": "windows-msix"
        }))
        .unwrap();

        assert_eq!(result.download_format, DownloadFormat::WindowsMsix);
        assert_eq!(result.auto_check, AutoCheckPolicy::PatchOnly);
        assert_eq!(result.release_root, DEFAULT_RELEASE_ROOT);
        assert_eq!(result.fetch_timeout_secs, DEFAULT_FETCH_TIMEOUT_SECS);
        assert_eq!(result.current_version, None);
    }

    #[test]
    fn preferences_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<Preferences>(json!({
            "downloadFormat": "macos-arm64",
            "autoCheck": "all",
            "releaseRoot": "http://mirror.example/release",
            "fetchTimeoutSecs": 3,
            "currentVersion": "4.1.0"
        }))
        .unwrap();

        assert_eq!(
            result,
            Preferences {
                download_format: DownloadFormat::MacosArm64,
                auto_check: AutoCheckPolicy::All,
                release_root: "http://mirror.example/release".to_string(),
                fetch_timeout_secs: 3,
                current_version: Some("4.1.0".to_string()),
            }
        );
    }

    #[test]
    fn auto_check_policy_uses_short_names() {
        assert_eq!(
            serde_json::to_value(AutoCheckPolicy::PatchOnly).unwrap(),
            json!("patch")
        );
        assert_eq!(
            serde_json::from_value::<AutoCheckPolicy>(json!("none")).unwrap(),
            AutoCheckPolicy::None
        );
    }

    #[test]
    fn download_format_suffixes_match_release_filenames() {
        assert_eq!(DownloadFormat::LinuxX64.suffix(), "-linux-x64.tar.xz");
        assert_eq!(DownloadFormat::MacosX64.suffix(), "-macos-x64.dmg");
        assert_eq!(DownloadFormat::WindowsMsi.suffix(), "-windows-x64.msi");
    }

    #[test]
    fn preferences_load_defaults_when_missing_and_round_trips_save() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        assert_eq!(Preferences::load(&path).unwrap(), Preferences::default());

        let prefs = Preferences {
            auto_check: AutoCheckPolicy::None,
            download_format: DownloadFormat::WindowsZip,
            ..Default::default()
        };
        prefs.save(&path).unwrap();

        assert_eq!(Preferences::load(&path).unwrap(), prefs);
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/blender-update-check"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/blender-update-check")
        );
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./blender-update-check"));
    }
}
