//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use comrak::{Options, markdown_to_html};

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Render markdown to HTML.
///
/// Raw HTML in the source is escaped, so the output is safe to mark `|safe`.
///
/// Usage in templates: `{{ post.content|markdown|safe }}`
#[askama::filter_fn]
pub fn markdown(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(render_markdown(&value.to_string()))
}

/// Render markdown with GitHub Flavored Markdown extensions.
#[must_use]
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    markdown_to_html(content, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_basic() {
        let html = render_markdown("# Studying abroad\n\nPick **one** country.");
        assert!(html.contains("<h1>Studying abroad</h1>"));
        assert!(html.contains("<strong>one</strong>"));
    }

    #[test]
    fn test_render_markdown_strips_raw_html() {
        let html = render_markdown("<script>alert(1)</script>\n\nhello");
        assert!(!html.contains("<script>"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn test_render_markdown_tables() {
        let html = render_markdown("| Country | Intake |\n|---|---|\n| Canada | Fall |");
        assert!(html.contains("<table>"));
    }
}
