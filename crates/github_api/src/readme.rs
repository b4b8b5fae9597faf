use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::protocol::ReadmeResponse;

use crate::{error::GitHubError, render::render_markdown};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeDocument {
    pub name: Option<String>,
    pub markdown: String,
}

impl ReadmeDocument {
    pub fn to_html(&self) -> String {
        render_markdown(&self.markdown)
    }
}

pub fn decode_readme(response: &ReadmeResponse) -> Result<ReadmeDocument, GitHubError> {
    if !response.encoding.eq_ignore_ascii_case("base64") {
        return Err(GitHubError::UnsupportedEncoding(response.encoding.clone()));
    }
    Ok(ReadmeDocument {
        name: response.name.clone(),
        markdown: decode_base64_content(&response.content)?,
    })
}

/// GitHub wraps base64 payloads with newlines every 60 columns.
pub fn decode_base64_content(content: &str) -> Result<String, GitHubError> {
    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(content: &str, encoding: &str) -> ReadmeResponse {
        ReadmeResponse {
            content: content.to_string(),
            encoding: encoding.to_string(),
            name: Some("README.md".into()),
            path: Some("README.md".into()),
        }
    }

    #[test]
    fn decodes_heading_payload() {
        assert_eq!(decode_base64_content("IyB0ZXN0").expect("decode"), "# test");
    }

    #[test]
    fn strips_github_line_wrapping() {
        let doc = decode_readme(&response("IyB0\nZXN0\n", "base64")).expect("decode");
        assert_eq!(doc.markdown, "# test");
        assert_eq!(doc.name.as_deref(), Some("README.md"));
    }

    #[test]
    fn rejects_non_base64_encoding() {
        let err = decode_readme(&response("# test", "utf-8")).expect_err("must fail");
        assert!(matches!(err, GitHubError::UnsupportedEncoding(_)));
    }

    #[test]
    fn rejects_malformed_payload() {
        let err = decode_base64_content("***").expect_err("must fail");
        assert!(matches!(err, GitHubError::Base64(_)));
    }
}
