//! Rendering of destinations into output documents.
//!
//! Renderers receive one [`Destination`] at a time and return the text of its
//! output file. Two are built in: [`HtmlRenderer`] and [`YamlRenderer`].

mod html;
mod text;
mod yaml;

use std::path::Path;

use tracing::warn;

use crate::config::OutputFormat;
use crate::destination::Destination;
use crate::error::Result;

pub use html::{HtmlRenderer, DEFAULT_TEMPLATE};
pub use text::{html_escape, prettify_paragraphs};
pub use yaml::YamlRenderer;

/// Turns a destination into the contents of its output file.
pub trait Renderer {
    /// File extension of rendered output, without the dot.
    fn extension(&self) -> &'static str;

    /// Render one destination.
    fn render(&self, destination: &Destination<'_>) -> Result<String>;
}

/// Output file stem for a destination key.
///
/// Path separators become `_`, so every stem names a plain file inside the
/// output directory.
///
/// # Examples
/// ```
/// use addo::render::file_stem;
///
/// assert_eq!(file_stem("south_africa"), "south_africa");
/// assert_eq!(file_stem("../bosnia/herzegovina"), ".._bosnia_herzegovina");
/// ```
#[must_use]
pub fn file_stem(key: &str) -> String {
    key.replace(['/', '\\'], "_")
}

/// Create the renderer for an output format.
///
/// A template only applies to HTML output.
pub fn create_renderer(format: OutputFormat, template: Option<&Path>) -> Result<Box<dyn Renderer>> {
    match format {
        OutputFormat::Html => match template {
            Some(path) => Ok(Box::new(HtmlRenderer::from_file(path)?)),
            None => Ok(Box::new(HtmlRenderer::new())),
        },
        OutputFormat::Yaml => {
            if let Some(path) = template {
                warn!(template = %path.display(), "templates are ignored for YAML output");
            }
            Ok(Box::new(YamlRenderer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_renderer_extension() {
        let html = create_renderer(OutputFormat::Html, None).unwrap();
        assert_eq!(html.extension(), "html");
        let yaml = create_renderer(OutputFormat::Yaml, None).unwrap();
        assert_eq!(yaml.extension(), "yaml");
    }

    #[test]
    fn test_create_renderer_missing_template() {
        let result = create_renderer(OutputFormat::Html, Some(Path::new("/no/such/template.html")));
        assert!(result.is_err());
    }

    #[test]
    fn test_file_stem_has_no_separators() {
        for key in ["bosnia/herzegovina", "..\\windows", "../../etc/passwd", "/"] {
            let stem = file_stem(key);
            assert!(!stem.contains(['/', '\\']), "{stem}");
        }
        assert_eq!(file_stem("côte_d'ivoire"), "côte_d'ivoire");
    }
}
