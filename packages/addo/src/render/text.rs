//! Text helpers for HTML output.

use std::sync::LazyLock;

use regex::Regex;

/// Paragraphs shorter than this are treated as implied subheadings.
pub const SUBHEADING_MAX_LEN: usize = 40;

/// Two or more consecutive newlines separate paragraphs.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid regex"));

/// Mark up a block of plain text as HTML paragraphs.
///
/// Text is split on blank lines; each non-blank paragraph is wrapped in
/// `<p>`, and paragraphs shorter than [`SUBHEADING_MAX_LEN`] characters are
/// trimmed and wrapped in `<b>` as well. The input is not escaped.
///
/// # Examples
/// ```
/// use addo::render::prettify_paragraphs;
///
/// assert_eq!(prettify_paragraphs("Some Data"), "<p><b>Some Data</b></p>");
/// ```
#[must_use]
pub fn prettify_paragraphs(source: &str) -> String {
    PARAGRAPH_BREAK
        .split(source)
        .filter(|paragraph| !paragraph.trim().is_empty())
        .map(|paragraph| {
            if paragraph.chars().count() < SUBHEADING_MAX_LEN {
                format!("<p><b>{}</b></p>", paragraph.trim())
            } else {
                format!("<p>{paragraph}</p>")
            }
        })
        .collect()
}

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
