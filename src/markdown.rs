//! Markdown rendering behind a stable seam.
//!
//! The pipeline only needs `render(markdown) -> html`. [`PulldownRenderer`] is
//! the production implementation; tests substitute their own renderer to
//! exercise failure handling.

use pulldown_cmark::{Options, Parser, html as md_html};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("markdown rendering failed: {0}")]
pub struct RenderError(pub String);

/// Converts markdown text into an HTML fragment.
///
/// Implementations must be deterministic for identical input.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// CommonMark renderer backed by `pulldown-cmark`, with tables,
/// strikethrough and footnotes enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownRenderer;

impl PulldownRenderer {
    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);
        options
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let parser = Parser::new_ext(markdown, Self::options());
        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        md_html::push_html(&mut html, parser);
        Ok(html)
    }
}
