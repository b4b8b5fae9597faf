//! The two visitor flows: anonymous README rendering and the token-gated
//! maintainer panel.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
};

use github_api::{ClientFactory, ReadmeSource};
use shared::{
    domain::{AccessToken, Message, RepoIdentity, Session, Severity, ViewState},
    error::{maintainer_welcome_text, PortalError, MISSING_TOKEN_TEXT, READ_ONLY_NOTICE_TEXT},
};
use tracing::{debug, error, info, warn};

use crate::{
    controller::events::{CommandOutcome, LoginOutcome, UiCommand, ENTER_KEY},
    fragments::FragmentEngine,
    surface::{ElementRole, PageSurface},
};

/// Held for the duration of one flow; a second flow started meanwhile is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SessionController {
    repo: RepoIdentity,
    readme: Arc<dyn ReadmeSource>,
    clients: Arc<dyn ClientFactory>,
    fragments: Arc<dyn FragmentEngine>,
    allow_anonymous_readme: bool,
    state: Mutex<ViewState>,
    in_flight: AtomicBool,
}

impl SessionController {
    pub fn new(
        readme: Arc<dyn ReadmeSource>,
        clients: Arc<dyn ClientFactory>,
        fragments: Arc<dyn FragmentEngine>,
    ) -> Self {
        Self {
            repo: RepoIdentity::configured(),
            readme,
            clients,
            fragments,
            allow_anonymous_readme: false,
            state: Mutex::new(ViewState::Initial),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_repo(mut self, repo: RepoIdentity) -> Self {
        self.repo = repo;
        self
    }

    pub fn allow_anonymous_readme(mut self, allow: bool) -> Self {
        self.allow_anonymous_readme = allow;
        self
    }

    pub fn repo(&self) -> &RepoIdentity {
        &self.repo
    }

    pub fn view_state(&self) -> ViewState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_view_state(&self, next: ViewState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(
            from = ?*state,
            to = ?next,
            dominant = next.dominant_element(),
            "view state transition"
        );
        *state = next;
    }

    pub async fn handle(&self, surface: &dyn PageSurface, command: UiCommand) -> CommandOutcome {
        debug!(command = command.name(), "handling ui command");
        match command {
            UiCommand::LoginClicked { token } => {
                CommandOutcome::Login(self.check_permissions_and_initialize(surface, &token).await)
            }
            UiCommand::TokenKeyUp { key, token } if key == ENTER_KEY => {
                CommandOutcome::Login(self.check_permissions_and_initialize(surface, &token).await)
            }
            UiCommand::TokenKeyUp { .. } => CommandOutcome::Ignored,
            UiCommand::ViewReadme if self.allow_anonymous_readme => {
                CommandOutcome::Readme(self.show_read_only_mode(surface).await)
            }
            UiCommand::ViewReadme => {
                info!("anonymous README view is disabled; login required");
                CommandOutcome::Ignored
            }
        }
    }

    /// Replaces the messages area; a page without one is left untouched.
    pub fn display_message(&self, surface: &dyn PageSurface, message: Message) {
        if !surface.has_element(ElementRole::Messages) {
            return;
        }
        surface.show_message(&message);
    }

    pub async fn show_read_only_mode(&self, surface: &dyn PageSurface) -> Result<(), PortalError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("README requested while another request is in flight");
            return Err(PortalError::Busy);
        };
        let state = self.view_state();
        if state.is_terminal() {
            debug!(state = ?state, "read-only view requested after session settled");
            return Err(PortalError::Settled);
        }
        self.run_read_only(surface).await
    }

    async fn run_read_only(&self, surface: &dyn PageSurface) -> Result<(), PortalError> {
        surface.set_visible(ElementRole::LoadingIndicator, true);
        surface.set_visible(ElementRole::LoginSection, false);
        self.set_view_state(ViewState::ReadOnly);

        let result = match self.readme.fetch_readme(&self.repo).await {
            Ok(doc) => {
                surface.set_inner_html(ElementRole::ReadmeContent, &doc.to_html());
                surface.set_visible(ElementRole::ReadmeContainer, true);
                info!(repo = %self.repo, "rendered repository README");
                Ok(())
            }
            Err(err) => {
                let err = PortalError::FetchFailure(err.to_string());
                error!(error = %err, kind = ?err.kind(), repo = %self.repo, "failed to load README");
                self.display_message(surface, Message::new(err.user_message(), Severity::Error));
                Err(err)
            }
        };

        surface.set_visible(ElementRole::LoadingIndicator, false);
        result
    }

    pub async fn check_permissions_and_initialize(
        &self,
        surface: &dyn PageSurface,
        token: &str,
    ) -> LoginOutcome {
        let Some(token) = AccessToken::parse(token) else {
            self.display_message(surface, Message::new(MISSING_TOKEN_TEXT, Severity::Error));
            return LoginOutcome::Rejected;
        };
        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("login attempt ignored; another attempt is in flight");
            return LoginOutcome::Ignored;
        };
        let state = self.view_state();
        if state.is_terminal() {
            debug!(state = ?state, "login ignored after session settled");
            return LoginOutcome::Ignored;
        }

        self.set_view_state(ViewState::Checking);
        surface.set_visible(ElementRole::LoadingIndicator, true);
        surface.set_visible(ElementRole::LoginSection, false);

        let outcome = match self.resolve_session(token).await {
            Ok(session) if session.is_maintainer() => {
                self.display_message(
                    surface,
                    Message::new(maintainer_welcome_text(&session.username), Severity::Success),
                );
                surface.set_visible(ElementRole::InteractiveContainer, true);
                self.set_view_state(ViewState::Authenticated);
                LoginOutcome::Maintainer(session)
            }
            Ok(session) => {
                self.display_message(surface, Message::new(READ_ONLY_NOTICE_TEXT, Severity::Info));
                // README failures are already surfaced by the read-only flow.
                let _ = self.run_read_only(surface).await;
                LoginOutcome::ReadOnly(session)
            }
            Err(err) => {
                error!(
                    error = %err,
                    kind = ?err.kind(),
                    repo = %self.repo,
                    "authentication/permission check failed"
                );
                self.display_message(surface, Message::new(err.user_message(), Severity::Error));
                surface.set_visible(ElementRole::LoginSection, true);
                self.set_view_state(ViewState::Initial);
                LoginOutcome::Failed(err)
            }
        };

        surface.set_visible(ElementRole::LoadingIndicator, false);
        drop(guard);

        // The session is settled before the tab loads; a slow fragment only
        // leaves the tab slot empty.
        if matches!(outcome, LoginOutcome::Maintainer(_)) {
            self.load_first_tab(surface).await;
        }
        outcome
    }

    async fn resolve_session(&self, token: AccessToken) -> Result<Session, PortalError> {
        let auth_failure = |err: github_api::GitHubError| PortalError::AuthFailure(err.to_string());

        let api = self.clients.authenticated(&token).map_err(auth_failure)?;
        let user = api.current_user().await.map_err(auth_failure)?;
        let permission = api
            .collaborator_permission(&self.repo, &user.login)
            .await
            .map_err(auth_failure)?;

        info!(
            username = %user.login,
            permission = permission.as_str(),
            repo = %self.repo,
            "resolved collaborator permission"
        );
        Ok(Session {
            token,
            username: user.login,
            permission,
        })
    }

    async fn load_first_tab(&self, surface: &dyn PageSurface) {
        let tabs = self.fragments.process(surface);
        let Some(first) = tabs.first() else {
            debug!("no fragment tabs on page");
            return;
        };
        match self.fragments.load(&first.hx_get).await {
            Ok(html) => surface.set_inner_html(ElementRole::TabContent, &html),
            Err(err) => warn!(error = %err, tab = %first.label, "failed to load first tab"),
        }
    }
}

#[cfg(test)]
#[path = "../tests/session_tests.rs"]
mod tests;
