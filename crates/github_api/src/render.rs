use pulldown_cmark::{html, Options, Parser};

/// Renders README Markdown to HTML with the GitHub-flavoured extensions
/// READMEs commonly use.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_renders_as_h1() {
        assert_eq!(render_markdown("# test").trim(), "<h1>test</h1>");
    }

    #[test]
    fn tables_are_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"), "{html}");
    }

    #[test]
    fn strikethrough_is_enabled() {
        assert!(render_markdown("~~gone~~").contains("<del>gone</del>"));
    }
}
