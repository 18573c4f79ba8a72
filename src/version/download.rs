//! Artifact filename matching within a release line directory listing

use regex::Regex;
use semver::Version;
use tracing::debug;

use crate::version::error::FetchError;
use crate::version::index::parse_component;
use crate::version::semver::ReleaseLine;

/// Filename prefix of every release artifact, e.g. `blender-4.1.1-linux-x64.tar.xz`
pub const FILE_PREFIX: &str = "blender-";

/// Characters that may appear inside an artifact filename
const FILENAME_CHARS: &str = r"A-Za-z0-9_.\-";

/// Newest artifact filename found for a release line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    pub version: Version,
    pub file_name: String,
}

/// Finds the last artifact of `line` ending in `suffix` on a directory listing.
///
/// A filename ends at the first character that cannot belong to one, so
/// `-windows-x64.msi` never matches an `.msix` build and `.zip` never matches
/// a `.zip.sha256` checksum. When the suffix carries a platform part before
/// its extension and nothing matches exactly, the search is retried requiring
/// only the final extension component (older directories used names like
/// `-windows64.zip` or `-linux-glibc217-x86_64.tar.xz`).
pub fn match_download(
    page: &str,
    line: ReleaseLine,
    suffix: &str,
) -> Result<Option<MatchedFile>, FetchError> {
    let prefix = line_prefix(line);

    let exact = format!(r"{}(\d+){}", prefix, regex::escape(suffix));
    if let Some(found) = last_match(page, line, &exact)? {
        return Ok(Some(found));
    }

    let Some(extension) = relaxed_extension(suffix) else {
        return Ok(None);
    };

    debug!(
        "No exact '{}' artifact for {}, retrying with '.{}'",
        suffix, line, extension
    );
    let relaxed = format!(
        r"{}(\d+)[{}]*?\.{}",
        prefix,
        FILENAME_CHARS,
        regex::escape(extension)
    );
    last_match(page, line, &relaxed)
}

/// `blender-4\.1\.` for line 4.1
fn line_prefix(line: ReleaseLine) -> String {
    format!(
        r"{}{}\.{}\.",
        regex::escape(FILE_PREFIX),
        line.major,
        line.minor
    )
}

/// `filename_pattern` must capture the patch digits as its only group
fn last_match(
    page: &str,
    line: ReleaseLine,
    filename_pattern: &str,
) -> Result<Option<MatchedFile>, FetchError> {
    let pattern = Regex::new(&format!(
        r"({})(?:[^{}]|$)",
        filename_pattern, FILENAME_CHARS
    ))?;

    let Some(caps) = pattern.captures_iter(page).last() else {
        return Ok(None);
    };

    let patch = parse_component(&caps[2])?;
    Ok(Some(MatchedFile {
        version: Version::new(line.major, line.minor, patch),
        file_name: caps[1].to_string(),
    }))
}

/// Final extension of a compound suffix, e.g. `xz` for `-linux-x64.tar.xz`.
/// Returns `None` for a bare extension such as `.zip`, which has nothing to relax.
fn relaxed_extension(suffix: &str) -> Option<&str> {
    let (platform, _) = suffix.split_once('.')?;
    if platform.is_empty() {
        return None;
    }
    suffix.rsplit('.').next().filter(|ext| !ext.is_empty())
}
