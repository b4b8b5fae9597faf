use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

const REPO_OWNER: &str = match option_env!("PORTAL_REPO_OWNER") {
    Some(owner) => owner,
    None => "sangron",
};
const REPO_NAME: &str = match option_env!("PORTAL_REPO_NAME") {
    Some(name) => name,
    None => "deco",
};

const MESSAGE_BASE_CLASSES: &str = "p-4 rounded-md mb-6 text-sm";

/// Repository whose collaborators may enter the maintainer panel.
///
/// Fixed when the crate is compiled; there is no runtime override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoIdentity {
    pub owner: String,
    pub name: String,
}

impl RepoIdentity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn configured() -> Self {
        Self::new(REPO_OWNER, REPO_NAME)
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Admin,
    Write,
    Read,
    #[serde(other)]
    None,
}

impl Permission {
    pub fn can_maintain(self) -> bool {
        matches!(self, Permission::Admin | Permission::Write)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Admin => "admin",
            Permission::Write => "write",
            Permission::Read => "read",
            Permission::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "info" => Some(Severity::Info),
            "success" => Some(Severity::Success),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }

    pub fn style_classes(self) -> &'static str {
        match self {
            Severity::Info => "bg-sky-800 text-sky-100",
            Severity::Success => "bg-green-800 text-green-100",
            Severity::Error => "bg-red-800 text-red-100",
        }
    }
}

/// A single notice in the messages area. Each new message replaces the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub severity: Option<Severity>,
}

impl Message {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity: Some(severity),
        }
    }

    /// Unrecognized severity names keep the text and drop the color classes.
    pub fn with_severity_name(text: impl Into<String>, severity: &str) -> Self {
        Self {
            text: text.into(),
            severity: Severity::from_name(severity),
        }
    }

    pub fn class_name(&self) -> String {
        match self.severity {
            Some(severity) => format!("{MESSAGE_BASE_CLASSES} {}", severity.style_classes()),
            None => MESSAGE_BASE_CLASSES.to_string(),
        }
    }
}

/// Personal access token. Redacted in debug output and wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Returns `None` for an empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Outcome of a successful login attempt, owned by whoever triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: AccessToken,
    pub username: String,
    pub permission: Permission,
}

impl Session {
    pub fn is_maintainer(&self) -> bool {
        self.permission.can_maintain()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Initial,
    Checking,
    Authenticated,
    ReadOnly,
}

impl ViewState {
    /// Element id that dominates the page in this state.
    pub fn dominant_element(self) -> &'static str {
        match self {
            ViewState::Initial => "login-section",
            ViewState::Checking => "loading-indicator",
            ViewState::Authenticated => "interactive-accordion-container",
            ViewState::ReadOnly => "readme-display-container",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ViewState::Authenticated | ViewState::ReadOnly)
    }
}

/// Tab button carrying an `hx-get` fragment endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabControl {
    pub label: String,
    pub hx_get: String,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
