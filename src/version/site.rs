//! Release site layout: URL construction plus the index and listing lookups

use semver::Version;
use tracing::debug;

use crate::version::download::match_download;
use crate::version::error::FetchError;
use crate::version::fetcher::PageFetcher;
use crate::version::index::{DIRECTORY_PREFIX, extract_release_lines};
use crate::version::semver::ReleaseLine;
use crate::version::types::DownloadMatch;

/// The release file tree rooted at e.g. `http://download.blender.org/release`
pub struct ReleaseSite<F> {
    fetcher: F,
    root: String,
}

impl<F: PageFetcher> ReleaseSite<F> {
    pub fn new(fetcher: F, root: &str) -> Self {
        Self {
            fetcher,
            root: root.trim_end_matches('/').to_string(),
        }
    }

    /// `{root}/`
    pub fn index_url(&self) -> String {
        format!("{}/", self.root)
    }

    /// `{root}/Blender{major}.{minor}/`
    pub fn line_url(&self, line: ReleaseLine) -> String {
        format!("{}/{}{}/", self.root, DIRECTORY_PREFIX, line)
    }

    /// Lists every release line on the root index, in document order
    pub async fn list_available_versions(&self) -> Result<Vec<ReleaseLine>, FetchError> {
        let page = self.fetcher.fetch(&self.index_url()).await?;
        let lines = extract_release_lines(&page)?;
        debug!("Release index lists {} entries", lines.len());
        Ok(lines)
    }

    /// Finds the newest `suffix` artifact of `line`, if it is newer than `baseline`
    pub async fn find_download(
        &self,
        baseline: &Version,
        line: ReleaseLine,
        suffix: &str,
    ) -> Result<Option<DownloadMatch>, FetchError> {
        let url = self.line_url(line);
        let page = self.fetcher.fetch(&url).await?;

        let Some(found) = match_download(&page, line, suffix)? else {
            debug!("No '{}' artifact listed for {}", suffix, line);
            return Ok(None);
        };

        if found.version <= *baseline {
            debug!(
                "Newest {} artifact {} is not newer than {}",
                line, found.version, baseline
            );
            return Ok(None);
        }

        Ok(Some(DownloadMatch {
            version: found.version,
            url: format!("{}{}", url, found.file_name),
        }))
    }
}
