//! Markdown rendering for guide bodies.
//!
//! Converts markdown source into an HTML fragment. Rendering is pure and
//! deterministic: no I/O, no shared state, identical output for identical
//! input and option set. Malformed markdown never fails; it degrades per
//! CommonMark recovery rules and still produces a fragment.

use pulldown_cmark::{Options, Parser, html};

/// Markdown-to-HTML renderer with GFM extensions enabled by default.
#[derive(Clone, Copy, Debug)]
pub struct MarkdownRenderer {
    gfm: bool,
}

impl MarkdownRenderer {
    /// Create a renderer with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GFM extensions (tables, strikethrough, task lists).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Parser options matching the current configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown source to an HTML fragment.
    ///
    /// The fragment carries no page chrome; wrapping it in a full document
    /// is the templates' job.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_renders_heading_and_paragraph() {
        let html = MarkdownRenderer::new().render("# Hello\n\nWorld.");
        assert_eq!(html, "<h1>Hello</h1>\n<p>World.</p>\n");
    }

    #[test]
    fn test_renders_inline_formatting_and_links() {
        let html = MarkdownRenderer::new().render("Read the **[docs](https://example.com)**.");
        assert_eq!(
            html,
            "<p>Read the <strong><a href=\"https://example.com\">docs</a></strong>.</p>\n"
        );
    }

    #[test]
    fn test_renders_fenced_code_with_language() {
        let html = MarkdownRenderer::new().render("```rust\nfn main() {}\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn test_gfm_table_renders_as_table() {
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |";

        let with_gfm = MarkdownRenderer::new().render(markdown);
        assert!(with_gfm.contains("<table>"));

        let without_gfm = MarkdownRenderer::new().with_gfm(false).render(markdown);
        assert!(!without_gfm.contains("<table>"));
    }

    #[test]
    fn test_strikethrough_requires_gfm() {
        let html = MarkdownRenderer::new().render("~~old~~ new");
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_task_list_renders_checkboxes() {
        let html = MarkdownRenderer::new().render("- [x] done\n- [ ] pending");
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("checked=\"\""));
    }

    #[test]
    fn test_unclosed_emphasis_degrades_without_error() {
        let html = MarkdownRenderer::new().render("some *unclosed emphasis");
        assert_eq!(html, "<p>some *unclosed emphasis</p>\n");
    }

    #[test]
    fn test_empty_input_renders_empty_fragment() {
        assert_eq!(MarkdownRenderer::new().render(""), "");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = MarkdownRenderer::new();
        let markdown = "# A\n\n- one\n- two\n\n> quote";
        assert_eq!(renderer.render(markdown), renderer.render(markdown));
    }
}
