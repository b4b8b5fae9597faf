//! Terminal rendering of the page model after each command.

use std::fmt::Write as _;

use portal_core::{ElementRole, PageSnapshot};

pub fn render(snapshot: &PageSnapshot) -> String {
    let mut out = String::new();

    if snapshot.is_visible(ElementRole::Messages) {
        if let Some(message) = &snapshot.message {
            let label = message
                .severity
                .map(|s| format!("{s:?}").to_ascii_uppercase())
                .unwrap_or_else(|| "NOTICE".into());
            let _ = writeln!(out, "[{label}] {}", message.text);
        }
    }

    match snapshot.dominant() {
        Some(ElementRole::InteractiveContainer) => {
            let _ = writeln!(out, "== maintainer panel ==");
            match snapshot.html(ElementRole::TabContent) {
                Some(html) => {
                    let _ = writeln!(out, "{html}");
                }
                None => {
                    let _ = writeln!(out, "(no tab content loaded)");
                }
            }
        }
        Some(ElementRole::ReadmeContainer) => {
            let _ = writeln!(out, "== README ==");
            if let Some(html) = snapshot.html(ElementRole::ReadmeContent) {
                let _ = writeln!(out, "{html}");
            }
        }
        Some(ElementRole::LoginSection) => {
            let _ = writeln!(out, "(login required)");
        }
        _ => {}
    }

    out
}
