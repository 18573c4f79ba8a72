//! Page fetcher trait and the reqwest-backed implementation

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::version::error::FetchError;

/// Trait for fetching a page body from the release site
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` with a single GET
    ///
    /// # Returns
    /// * `Ok(String)` - Response body when the server answered 200
    /// * `Err(FetchError)` - Transport failure, timeout or any other status
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetcher implementation over a plain reqwest client
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent("blender-update-check")
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::Network(e)
            }
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("Release site returned status {}: {}", status, url);
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| {
            warn!("Failed to read response from {}: {}", url, e);
            FetchError::InvalidResponse(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_body_on_ok() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/release/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<a href=\"Blender4.1/\">Blender4.1/</a>")
            .create_async()
            .await;

        let body = fetcher()
            .fetch(&format!("{}/release/", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, "<a href=\"Blender4.1/\">Blender4.1/</a>");
    }

    #[tokio::test]
    async fn fetch_returns_unexpected_status_for_not_found() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/release/Blender9.9/")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let url = format!("{}/release/Blender9.9/", server.url());
        let result = fetcher().fetch(&url).await;

        mock.assert_async().await;
        match result {
            Err(FetchError::UnexpectedStatus { status, url: failed }) => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("expected UnexpectedStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_treats_non_ok_success_codes_as_failures() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .with_status(204)
            .create_async()
            .await;

        let result = fetcher().fetch(&format!("{}/", server.url())).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(FetchError::UnexpectedStatus { status: 204, .. })
        ));
    }

    #[tokio::test]
    async fn fetch_returns_network_error_when_unreachable() {
        // Port 9 (discard) on localhost is not expected to be listening
        let result = fetcher().fetch("http://127.0.0.1:9/").await;

        assert!(matches!(
            result,
            Err(FetchError::Network(_)) | Err(FetchError::Timeout(_))
        ));
    }
}
