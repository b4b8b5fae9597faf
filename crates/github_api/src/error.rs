use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("invalid GitHub API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("{endpoint} requires an access token")]
    MissingToken { endpoint: String },
    #[error("unsupported README encoding '{0}'")]
    UnsupportedEncoding(String),
    #[error("README content is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("README content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl GitHubError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
