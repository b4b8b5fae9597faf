//! Commands the host raises from page interactions, and what they produced.

use shared::{domain::Session, error::PortalError};

pub const ENTER_KEY: &str = "Enter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    LoginClicked { token: String },
    TokenKeyUp { key: String, token: String },
    /// Anonymous README view; only honored when the host enables it.
    ViewReadme,
}

impl UiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            UiCommand::LoginClicked { .. } => "login_clicked",
            UiCommand::TokenKeyUp { .. } => "token_key_up",
            UiCommand::ViewReadme => "view_readme",
        }
    }
}

#[derive(Debug)]
pub enum LoginOutcome {
    Maintainer(Session),
    ReadOnly(Session),
    /// Empty token; nothing was sent.
    Rejected,
    Failed(PortalError),
    Ignored,
}

impl LoginOutcome {
    pub fn session(&self) -> Option<&Session> {
        match self {
            LoginOutcome::Maintainer(session) | LoginOutcome::ReadOnly(session) => Some(session),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum CommandOutcome {
    Login(LoginOutcome),
    Readme(Result<(), PortalError>),
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{AccessToken, Permission};

    fn session(permission: Permission) -> Session {
        Session {
            token: AccessToken::parse("ghp_token").expect("token"),
            username: "octo".into(),
            permission,
        }
    }

    #[test]
    fn settled_logins_expose_their_session() {
        let maintainer = LoginOutcome::Maintainer(session(Permission::Admin));
        assert_eq!(maintainer.session().map(|s| s.username.as_str()), Some("octo"));

        let reader = LoginOutcome::ReadOnly(session(Permission::Read));
        assert_eq!(reader.session().map(|s| s.permission), Some(Permission::Read));
    }

    #[test]
    fn unsettled_logins_have_no_session() {
        assert!(LoginOutcome::Rejected.session().is_none());
        assert!(LoginOutcome::Ignored.session().is_none());
        assert!(LoginOutcome::Failed(PortalError::Busy).session().is_none());
    }
}
