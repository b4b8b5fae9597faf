//! Page surface: the fixed set of elements the controller toggles, behind a
//! trait so any host (browser bridge, terminal, tests) can render them.

use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard, PoisonError},
};

use shared::{
    domain::{Message, TabControl},
    error::PortalError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    Messages,
    LoginSection,
    TokenInput,
    LoginButton,
    LoadingIndicator,
    ReadmeContainer,
    ReadmeContent,
    InteractiveContainer,
    TabContent,
}

pub const REQUIRED_ELEMENTS: [ElementRole; 8] = [
    ElementRole::Messages,
    ElementRole::LoginSection,
    ElementRole::TokenInput,
    ElementRole::LoginButton,
    ElementRole::LoadingIndicator,
    ElementRole::ReadmeContainer,
    ElementRole::ReadmeContent,
    ElementRole::InteractiveContainer,
];

impl ElementRole {
    pub fn dom_id(self) -> &'static str {
        match self {
            ElementRole::Messages => "messages",
            ElementRole::LoginSection => "login-section",
            ElementRole::TokenInput => "github-token",
            ElementRole::LoginButton => "login-btn",
            ElementRole::LoadingIndicator => "loading-indicator",
            ElementRole::ReadmeContainer => "readme-display-container",
            ElementRole::ReadmeContent => "readme-content",
            ElementRole::InteractiveContainer => "interactive-accordion-container",
            ElementRole::TabContent => "tab-content",
        }
    }
}

/// Methods take `&self`; implementations own their interior mutability the
/// way a DOM does.
pub trait PageSurface: Send + Sync {
    fn has_element(&self, role: ElementRole) -> bool;
    fn set_visible(&self, role: ElementRole, visible: bool);
    fn is_visible(&self, role: ElementRole) -> bool;
    fn show_message(&self, message: &Message);
    fn set_inner_html(&self, role: ElementRole, html: &str);
    /// Controls declaring a fragment endpoint, in document order.
    fn tab_controls(&self) -> Vec<TabControl>;
}

/// Checks every required element once, reporting all missing ids together.
pub fn validate_page(surface: &dyn PageSurface) -> Result<(), PortalError> {
    let missing: Vec<String> = REQUIRED_ELEMENTS
        .iter()
        .filter(|role| !surface.has_element(**role))
        .map(|role| role.dom_id().to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PortalError::MissingElements(missing))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub present: HashSet<ElementRole>,
    pub visible: HashSet<ElementRole>,
    pub message: Option<Message>,
    pub message_class: Option<String>,
    pub html: HashMap<ElementRole, String>,
    pub tabs: Vec<TabControl>,
}

impl PageSnapshot {
    pub fn is_visible(&self, role: ElementRole) -> bool {
        self.visible.contains(&role)
    }

    pub fn html(&self, role: ElementRole) -> Option<&str> {
        self.html.get(&role).map(String::as_str)
    }

    /// Highest-priority visible container.
    pub fn dominant(&self) -> Option<ElementRole> {
        [
            ElementRole::LoadingIndicator,
            ElementRole::InteractiveContainer,
            ElementRole::ReadmeContainer,
            ElementRole::LoginSection,
        ]
        .into_iter()
        .find(|role| self.is_visible(*role))
    }
}

/// In-memory page. Starts with only the login form showing.
#[derive(Debug)]
pub struct PageModel {
    state: Mutex<PageSnapshot>,
}

impl PageModel {
    pub fn new(tabs: Vec<TabControl>) -> Self {
        let mut present: HashSet<ElementRole> = REQUIRED_ELEMENTS.into_iter().collect();
        present.insert(ElementRole::TabContent);
        let visible = [
            ElementRole::LoginSection,
            ElementRole::TokenInput,
            ElementRole::LoginButton,
        ]
        .into_iter()
        .collect();

        Self {
            state: Mutex::new(PageSnapshot {
                present,
                visible,
                tabs,
                ..PageSnapshot::default()
            }),
        }
    }

    pub fn without(self, roles: &[ElementRole]) -> Self {
        {
            let mut state = self.lock();
            for role in roles {
                state.present.remove(role);
                state.visible.remove(role);
            }
        }
        self
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, PageSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PageModel {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PageSurface for PageModel {
    fn has_element(&self, role: ElementRole) -> bool {
        self.lock().present.contains(&role)
    }

    fn set_visible(&self, role: ElementRole, visible: bool) {
        let mut state = self.lock();
        if !state.present.contains(&role) {
            return;
        }
        if visible {
            state.visible.insert(role);
        } else {
            state.visible.remove(&role);
        }
    }

    fn is_visible(&self, role: ElementRole) -> bool {
        self.lock().visible.contains(&role)
    }

    fn show_message(&self, message: &Message) {
        let mut state = self.lock();
        if !state.present.contains(&ElementRole::Messages) {
            return;
        }
        state.message_class = Some(message.class_name());
        state.message = Some(message.clone());
        state.visible.insert(ElementRole::Messages);
    }

    fn set_inner_html(&self, role: ElementRole, html: &str) {
        let mut state = self.lock();
        if state.present.contains(&role) {
            state.html.insert(role, html.to_string());
        }
    }

    fn tab_controls(&self) -> Vec<TabControl> {
        self.lock().tabs.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Severity;

    #[test]
    fn fresh_page_shows_login_only() {
        let page = PageModel::default();
        let snapshot = page.snapshot();
        assert_eq!(snapshot.dominant(), Some(ElementRole::LoginSection));
        assert!(!snapshot.is_visible(ElementRole::Messages));
        assert!(!snapshot.is_visible(ElementRole::InteractiveContainer));
        assert!(!snapshot.is_visible(ElementRole::ReadmeContainer));
    }

    #[test]
    fn validation_lists_every_missing_element() {
        let page = PageModel::default()
            .without(&[ElementRole::LoadingIndicator, ElementRole::ReadmeContent]);
        let err = validate_page(&page).expect_err("must fail");
        match err {
            PortalError::MissingElements(ids) => {
                assert_eq!(ids, vec!["loading-indicator", "readme-content"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn complete_page_validates() {
        validate_page(&PageModel::default()).expect("valid page");
    }

    #[test]
    fn message_replaces_previous_and_becomes_visible() {
        let page = PageModel::default();
        page.show_message(&Message::new("first", Severity::Info));
        page.show_message(&Message::new("second", Severity::Error));

        let snapshot = page.snapshot();
        assert!(snapshot.is_visible(ElementRole::Messages));
        assert_eq!(snapshot.message.map(|m| m.text), Some("second".to_string()));
        assert!(snapshot
            .message_class
            .expect("class")
            .contains("bg-red-800"));
    }

    #[test]
    fn absent_elements_ignore_updates() {
        let page = PageModel::default().without(&[ElementRole::Messages]);
        page.show_message(&Message::new("dropped", Severity::Info));
        page.set_visible(ElementRole::Messages, true);
        assert!(page.snapshot().message.is_none());
        assert!(!page.is_visible(ElementRole::Messages));
    }
}
