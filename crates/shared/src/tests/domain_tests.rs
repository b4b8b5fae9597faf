use super::*;

#[test]
fn maintain_rights_cover_admin_and_write_only() {
    assert!(Permission::Admin.can_maintain());
    assert!(Permission::Write.can_maintain());
    assert!(!Permission::Read.can_maintain());
    assert!(!Permission::None.can_maintain());
}

#[test]
fn unknown_permission_string_deserializes_as_none() {
    let parsed: Permission = serde_json::from_str("\"triage\"").expect("permission");
    assert_eq!(parsed, Permission::None);
    let parsed: Permission = serde_json::from_str("\"write\"").expect("permission");
    assert_eq!(parsed, Permission::Write);
}

#[test]
fn message_classes_follow_severity() {
    let info = Message::new("hello", Severity::Info);
    assert_eq!(info.class_name(), "p-4 rounded-md mb-6 text-sm bg-sky-800 text-sky-100");
    let success = Message::new("ok", Severity::Success);
    assert!(success.class_name().ends_with("bg-green-800 text-green-100"));
    let error = Message::new("bad", Severity::Error);
    assert!(error.class_name().ends_with("bg-red-800 text-red-100"));
}

#[test]
fn unrecognized_severity_keeps_text_without_color() {
    let message = Message::with_severity_name("still shown", "warning");
    assert_eq!(message.text, "still shown");
    assert_eq!(message.severity, None);
    assert_eq!(message.class_name(), "p-4 rounded-md mb-6 text-sm");
}

#[test]
fn access_token_rejects_blank_input_and_redacts_debug() {
    assert!(AccessToken::parse("").is_none());
    assert!(AccessToken::parse("   ").is_none());

    let token = AccessToken::parse(" ghp_secret ").expect("token");
    assert_eq!(token.expose(), "ghp_secret");
    assert!(!format!("{token:?}").contains("ghp_secret"));
}

#[test]
fn terminal_states_are_authenticated_and_read_only() {
    assert!(ViewState::Authenticated.is_terminal());
    assert!(ViewState::ReadOnly.is_terminal());
    assert!(!ViewState::Initial.is_terminal());
    assert!(!ViewState::Checking.is_terminal());
    assert_eq!(ViewState::Checking.dominant_element(), "loading-indicator");
}

#[test]
fn configured_repo_displays_as_owner_slash_name() {
    let repo = RepoIdentity::new("sangron", "deco");
    assert_eq!(repo.to_string(), "sangron/deco");
}
