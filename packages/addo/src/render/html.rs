//! Built-in HTML page renderer.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::text::{html_escape, prettify_paragraphs};
use super::{file_stem, Renderer};
use crate::destination::{Destination, DestinationMetadata};
use crate::error::Result;
use crate::tree::TreeValue;

/// Page shell used when no template file is given.
///
/// Placeholders: `{{title}}`, `{{key}}`, `{{asset_id}}`, `{{parents}}`,
/// `{{children}}` and `{{content}}`.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="destination" content="{{key}}">
  <meta name="asset-id" content="{{asset_id}}">
  <title>{{title}}</title>
  <style>
    body { font-family: Georgia, "Times New Roman", serif; margin: 0; color: #222; background: #fafafa; }
    header { background: #1d4e6b; color: #fff; padding: 1.5em 2em; }
    header h1 { margin: 0; font-weight: normal; }
    nav.breadcrumbs { font-size: 0.9em; margin-bottom: 0.5em; }
    nav.breadcrumbs a { color: #cfe6f3; text-decoration: none; }
    .layout { display: flex; gap: 2em; padding: 2em; }
    aside { flex: 0 0 14em; }
    aside ul { list-style: none; padding: 0; }
    aside li { margin: 0.3em 0; }
    main { flex: 1; max-width: 48em; line-height: 1.5; }
    section { margin-bottom: 1.5em; }
  </style>
</head>
<body>
  <header>
    <nav class="breadcrumbs">{{parents}}</nav>
    <h1>{{title}}</h1>
  </header>
  <div class="layout">
    <aside>
      <h3>Explore</h3>
      <ul>{{children}}</ul>
    </aside>
    <main>
{{content}}
    </main>
  </div>
</body>
</html>
"#;

/// Deepest heading level used for nested content.
const MAX_HEADING_LEVEL: usize = 6;

/// A `{{name}}` placeholder in a page template.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid regex"));

/// Renders destinations as HTML pages linking to their relations.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    template: String,
}

impl HtmlRenderer {
    /// Renderer using [`DEFAULT_TEMPLATE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    /// Renderer using a custom page shell.
    #[must_use]
    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Renderer using a page shell read from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::with_template(fs::read_to_string(path)?))
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HtmlRenderer {
    fn extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, destination: &Destination<'_>) -> Result<String> {
        let parents: Vec<String> = destination.parents().map(link).collect();
        let children: String = destination
            .children()
            .map(|child| format!("<li>{}</li>", link(child)))
            .collect();

        let mut content = String::new();
        if let TreeValue::Map(map) = destination.content() {
            for (key, value) in map.iter() {
                render_value(&mut content, key, value, 2);
            }
        }

        let title = html_escape(destination.title());
        let key = html_escape(destination.name());
        let asset_id = html_escape(destination.asset_id().unwrap_or_default());
        let parents = parents.join(" &raquo; ");

        // Placeholders are filled from the template only, never from substituted values
        let page = PLACEHOLDER.replace_all(&self.template, |caps: &Captures<'_>| match &caps[1] {
            "title" => title.clone(),
            "key" => key.clone(),
            "asset_id" => asset_id.clone(),
            "parents" => parents.clone(),
            "children" => children.clone(),
            "content" => content.clone(),
            _ => caps[0].to_string(),
        });
        Ok(page.into_owned())
    }
}

fn link(metadata: &DestinationMetadata) -> String {
    format!(
        "<a href=\"{}.html\">{}</a>",
        html_escape(&file_stem(&metadata.name)),
        html_escape(&metadata.title)
    )
}

/// Turn a content key such as `getting_around` into `Getting around`.
fn heading(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn render_value(out: &mut String, key: &str, value: &TreeValue, level: usize) {
    let level = level.min(MAX_HEADING_LEVEL);
    out.push_str(&format!(
        "<section class=\"{}\"><h{level}>{}</h{level}>",
        html_escape(key),
        html_escape(&heading(key))
    ));
    render_body(out, value, level);
    out.push_str("</section>\n");
}

fn render_body(out: &mut String, value: &TreeValue, level: usize) {
    match value {
        TreeValue::Text(text) => out.push_str(&prettify_paragraphs(&html_escape(text))),
        TreeValue::Map(map) => {
            for (key, child) in map.iter() {
                render_value(out, key, child, level + 1);
            }
        }
        TreeValue::List(items) => {
            for item in items {
                render_body(out, item, level);
            }
        }
    }
}
