use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timed out fetching {0}")]
    Timeout(String),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Could not parse version from '{0}'")]
    Parse(String),

    #[error("Invalid filename pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
