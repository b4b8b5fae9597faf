use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use github_api::{ApiConfig, DEFAULT_API_BASE_URL};
use serde::Deserialize;
use shared::domain::TabControl;

pub const DEFAULT_CONFIG_PATH: &str = "portal.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: Option<u64>,
    pub fragment_base_url: Option<String>,
    pub tabs: Vec<TabControl>,
    pub allow_anonymous_readme: bool,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            user_agent: format!("deco-portal/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: None,
            fragment_base_url: None,
            tabs: Vec::new(),
            allow_anonymous_readme: false,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            api_base_url: self.api_base_url.clone(),
            user_agent: self.user_agent.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_base_url: Option<String>,
    user_agent: Option<String>,
    request_timeout_secs: Option<u64>,
    fragment_base_url: Option<String>,
    #[serde(default)]
    tabs: Vec<TabControl>,
    allow_anonymous_readme: Option<bool>,
    log_filter: Option<String>,
}

/// Defaults, then the optional TOML file, then environment overrides.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, explicit) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };
    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
            apply_file(&mut settings, file_cfg);
        }
        Err(err) if explicit => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.user_agent {
        settings.user_agent = v;
    }
    if file_cfg.request_timeout_secs.is_some() {
        settings.request_timeout_secs = file_cfg.request_timeout_secs;
    }
    if file_cfg.fragment_base_url.is_some() {
        settings.fragment_base_url = file_cfg.fragment_base_url;
    }
    if !file_cfg.tabs.is_empty() {
        settings.tabs = file_cfg.tabs;
    }
    if let Some(v) = file_cfg.allow_anonymous_readme {
        settings.allow_anonymous_readme = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
}

fn apply_env(
    settings: &mut Settings,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = var("PORTAL_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = var("PORTAL_FRAGMENT_BASE_URL") {
        settings.fragment_base_url = Some(v);
    }

    if let Some(v) = var("PORTAL_LOG") {
        settings.log_filter = v;
    }

    if let Some(v) = var("PORTAL_REQUEST_TIMEOUT_SECS") {
        let secs = v
            .parse::<u64>()
            .with_context(|| format!("PORTAL_REQUEST_TIMEOUT_SECS must be seconds, got '{v}'"))?;
        settings.request_timeout_secs = Some(secs);
    }

    if let Some(v) = var("PORTAL_ALLOW_ANONYMOUS_README") {
        settings.allow_anonymous_readme = matches!(v.trim(), "1" | "true" | "yes");
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
