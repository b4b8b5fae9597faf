use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const README_FAILURE_TEXT: &str =
    "Failed to load repository information. Please try again later.";
pub const AUTH_FAILURE_TEXT: &str =
    "Authentication failed. Please check your token and permissions.";
pub const MISSING_TOKEN_TEXT: &str = "Please enter a GitHub Personal Access Token.";
pub const READ_ONLY_NOTICE_TEXT: &str = "You have read-only access.";
pub const PAGE_INCOMPLETE_TEXT: &str = "This page failed to load completely. Please reload it.";

pub fn maintainer_welcome_text(username: &str) -> String {
    format!("Authenticated as {username}. Welcome, maintainer!")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    FetchFailure,
    AuthFailure,
    MissingElements,
    Busy,
    Settled,
}

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("failed to load README: {0}")]
    FetchFailure(String),
    #[error("authentication or permission check failed: {0}")]
    AuthFailure(String),
    #[error("page is missing required elements: {}", .0.join(", "))]
    MissingElements(Vec<String>),
    #[error("another request is already in flight")]
    Busy,
    #[error("session already settled; reload the page to start over")]
    Settled,
}

impl PortalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PortalError::FetchFailure(_) => ErrorKind::FetchFailure,
            PortalError::AuthFailure(_) => ErrorKind::AuthFailure,
            PortalError::MissingElements(_) => ErrorKind::MissingElements,
            PortalError::Busy => ErrorKind::Busy,
            PortalError::Settled => ErrorKind::Settled,
        }
    }

    /// Text shown to the visitor; the underlying cause is only logged.
    pub fn user_message(&self) -> &'static str {
        match self {
            PortalError::FetchFailure(_) => README_FAILURE_TEXT,
            PortalError::AuthFailure(_) | PortalError::Busy => AUTH_FAILURE_TEXT,
            PortalError::MissingElements(_) | PortalError::Settled => PAGE_INCOMPLETE_TEXT,
        }
    }
}
