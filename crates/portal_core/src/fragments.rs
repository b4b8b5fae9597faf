//! Declarative fragment loading for the maintainer panel's tabs.

use async_trait::async_trait;
use github_api::ApiConfig;
use reqwest::Client;
use shared::domain::TabControl;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::surface::PageSurface;

#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("invalid fragment URL '{path}': {reason}")]
    InvalidUrl { path: String, reason: String },
    #[error("fragment request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build fragment HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("fragments are not available on this host")]
    Unavailable,
}

#[async_trait]
pub trait FragmentEngine: Send + Sync {
    /// Scans the surface for fragment-loading controls, in document order.
    fn process(&self, surface: &dyn PageSurface) -> Vec<TabControl>;
    /// Issues a GET for `path` and returns the fragment markup.
    async fn load(&self, path: &str) -> Result<String, FragmentError>;
}

pub struct HttpFragmentEngine {
    http: Client,
    base_url: Url,
}

impl HttpFragmentEngine {
    /// Shares the user agent and request timeout of the GitHub client.
    pub fn new(base_url: &str, config: &ApiConfig) -> Result<Self, FragmentError> {
        let base_url = Url::parse(base_url).map_err(|err| FragmentError::InvalidUrl {
            path: base_url.to_string(),
            reason: err.to_string(),
        })?;
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(FragmentError::ClientBuild)?;
        Ok(Self { http, base_url })
    }

    fn resolve(&self, path: &str) -> Result<Url, FragmentError> {
        self.base_url
            .join(path)
            .map_err(|err| FragmentError::InvalidUrl {
                path: path.to_string(),
                reason: err.to_string(),
            })
    }
}

#[async_trait]
impl FragmentEngine for HttpFragmentEngine {
    fn process(&self, surface: &dyn PageSurface) -> Vec<TabControl> {
        let tabs: Vec<TabControl> = surface
            .tab_controls()
            .into_iter()
            .filter(|tab| !tab.hx_get.trim().is_empty())
            .collect();
        debug!(count = tabs.len(), "processed fragment controls");
        tabs
    }

    async fn load(&self, path: &str) -> Result<String, FragmentError> {
        let url = self.resolve(path)?;
        let transport = |source| FragmentError::Transport {
            url: url.to_string(),
            source,
        };
        let response = self
            .http
            .get(url.clone())
            .header("HX-Request", "true")
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        response.text().await.map_err(transport)
    }
}

/// For hosts that render the maintainer panel without fragment tabs.
pub struct NoopFragmentEngine;

#[async_trait]
impl FragmentEngine for NoopFragmentEngine {
    fn process(&self, _surface: &dyn PageSurface) -> Vec<TabControl> {
        Vec::new()
    }

    async fn load(&self, _path: &str) -> Result<String, FragmentError> {
        Err(FragmentError::Unavailable)
    }
}

#[cfg(test)]
#[path = "tests/fragments_tests.rs"]
mod tests;
