use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn temp_settings_file(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("deco_portal_settings_{suffix}.toml"));
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_target_public_github_without_timeout() {
    let settings = Settings::default();
    assert_eq!(settings.api_base_url, "https://api.github.com");
    assert_eq!(settings.request_timeout_secs, None);
    assert!(!settings.allow_anonymous_readme);
    assert!(settings.api_config().request_timeout.is_none());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        r#"
api_base_url = "https://ghe.example.com/api/v3"
fragment_base_url = "https://portal.example.com/"
request_timeout_secs = 15

[[tabs]]
label = "Overview"
hx_get = "tabs/overview.html"
"#,
    );

    let settings = load_settings(Some(path.as_path())).expect("settings");
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(settings.api_base_url, "https://ghe.example.com/api/v3");
    assert_eq!(
        settings.fragment_base_url.as_deref(),
        Some("https://portal.example.com/")
    );
    assert_eq!(settings.tabs.len(), 1);
    assert_eq!(
        settings.api_config().request_timeout,
        Some(Duration::from_secs(15))
    );
}

#[test]
fn unknown_file_keys_are_rejected() {
    let path = temp_settings_file("repo_owner = \"someone-else\"\n");
    let err = load_settings(Some(path.as_path())).expect_err("must fail");
    fs::remove_file(&path).expect("cleanup");
    assert!(format!("{err:#}").contains("failed to parse settings file"));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let path = env::temp_dir().join("deco_portal_settings_does_not_exist.toml");
    assert!(load_settings(Some(path.as_path())).is_err());
}

#[test]
fn env_overrides_apply_with_app_prefix_last() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("PORTAL_API_BASE_URL", "http://first"),
            ("APP__API_BASE_URL", "http://second"),
            ("PORTAL_ALLOW_ANONYMOUS_README", "true"),
            ("PORTAL_REQUEST_TIMEOUT_SECS", "30"),
        ]),
    )
    .expect("apply env");

    assert_eq!(settings.api_base_url, "http://second");
    assert!(settings.allow_anonymous_readme);
    assert_eq!(settings.request_timeout_secs, Some(30));
}

#[test]
fn malformed_timeout_is_reported() {
    let mut settings = Settings::default();
    let err = apply_env(
        &mut settings,
        env_from(&[("PORTAL_REQUEST_TIMEOUT_SECS", "soon")]),
    )
    .expect_err("must fail");
    assert!(err.to_string().contains("PORTAL_REQUEST_TIMEOUT_SECS"));
}
