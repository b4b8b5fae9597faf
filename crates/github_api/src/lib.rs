//! Minimal GitHub REST client for the maintainer portal: README retrieval
//! without credentials, plus caller identity and collaborator permission
//! lookups with a personal access token.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{AccessToken, Permission, RepoIdentity},
    protocol::{CollaboratorPermissionResponse, ReadmeResponse, UserResponse},
};
use tracing::debug;
use url::Url;

pub mod error;
pub mod readme;
pub mod render;

pub use error::GitHubError;
pub use readme::{decode_base64_content, decode_readme, ReadmeDocument};
pub use render::render_markdown;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_base_url: String,
    pub user_agent: String,
    /// No timeout unless the host sets one.
    pub request_timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            user_agent: format!("deco-portal/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubUser {
    pub login: String,
    pub display_name: Option<String>,
}

impl From<UserResponse> for GitHubUser {
    fn from(value: UserResponse) -> Self {
        Self {
            login: value.login,
            display_name: value.name,
        }
    }
}

#[async_trait]
pub trait ReadmeSource: Send + Sync {
    async fn fetch_readme(&self, repo: &RepoIdentity) -> Result<ReadmeDocument, GitHubError>;
}

#[async_trait]
pub trait PermissionApi: Send + Sync {
    async fn current_user(&self) -> Result<GitHubUser, GitHubError>;
    async fn collaborator_permission(
        &self,
        repo: &RepoIdentity,
        username: &str,
    ) -> Result<Permission, GitHubError>;
}

/// Builds a fresh authenticated client for each login attempt.
pub trait ClientFactory: Send + Sync {
    fn authenticated(&self, token: &AccessToken) -> Result<Arc<dyn PermissionApi>, GitHubError>;
}

pub struct GitHubClientFactory {
    config: ApiConfig,
}

impl GitHubClientFactory {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

impl ClientFactory for GitHubClientFactory {
    fn authenticated(&self, token: &AccessToken) -> Result<Arc<dyn PermissionApi>, GitHubError> {
        let client = GitHubClient::authenticated(self.config.clone(), token.clone())?;
        Ok(Arc::new(client))
    }
}

pub struct GitHubClient {
    http: Client,
    base_url: Url,
    token: Option<AccessToken>,
}

impl GitHubClient {
    pub fn anonymous(config: ApiConfig) -> Result<Self, GitHubError> {
        Self::build(config, None)
    }

    pub fn authenticated(config: ApiConfig, token: AccessToken) -> Result<Self, GitHubError> {
        Self::build(config, Some(token))
    }

    fn build(config: ApiConfig, token: Option<AccessToken>) -> Result<Self, GitHubError> {
        let base_url = parse_base_url(&config.api_base_url)?;
        let mut builder = Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GitHubError::ClientBuild)?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = self
            .http
            .get(url)
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);
        match &self.token {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GitHubError> {
        let endpoint = url.path().to_string();
        debug!(endpoint = %endpoint, authenticated = self.is_authenticated(), "github request");

        let response = self
            .get(url)
            .send()
            .await
            .map_err(|source| GitHubError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| GitHubError::Transport { endpoint, source })
    }

    pub async fn fetch_readme(&self, repo: &RepoIdentity) -> Result<ReadmeDocument, GitHubError> {
        let url = self.endpoint(&["repos", &repo.owner, &repo.name, "readme"]);
        let body: ReadmeResponse = self.get_json(url).await?;
        decode_readme(&body)
    }

    pub async fn current_user(&self) -> Result<GitHubUser, GitHubError> {
        let url = self.endpoint(&["user"]);
        if self.token.is_none() {
            return Err(GitHubError::MissingToken {
                endpoint: url.path().to_string(),
            });
        }
        let body: UserResponse = self.get_json(url).await?;
        Ok(body.into())
    }

    pub async fn collaborator_permission(
        &self,
        repo: &RepoIdentity,
        username: &str,
    ) -> Result<Permission, GitHubError> {
        let url = self.endpoint(&[
            "repos",
            &repo.owner,
            &repo.name,
            "collaborators",
            username,
            "permission",
        ]);
        if self.token.is_none() {
            return Err(GitHubError::MissingToken {
                endpoint: url.path().to_string(),
            });
        }
        let body: CollaboratorPermissionResponse = self.get_json(url).await?;
        Ok(body.permission)
    }
}

#[async_trait]
impl ReadmeSource for GitHubClient {
    async fn fetch_readme(&self, repo: &RepoIdentity) -> Result<ReadmeDocument, GitHubError> {
        GitHubClient::fetch_readme(self, repo).await
    }
}

#[async_trait]
impl PermissionApi for GitHubClient {
    async fn current_user(&self) -> Result<GitHubUser, GitHubError> {
        GitHubClient::current_user(self).await
    }

    async fn collaborator_permission(
        &self,
        repo: &RepoIdentity,
        username: &str,
    ) -> Result<Permission, GitHubError> {
        GitHubClient::collaborator_permission(self, repo, username).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, GitHubError> {
    let url = Url::parse(raw.trim()).map_err(|err| GitHubError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(GitHubError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "URL cannot carry a path".into(),
        });
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
