//! Configuration constants, key normalization and settings-file handling.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::{AddoError, Result};

/// Tag name of a destination element in the destinations document.
pub const DESTINATION_TAG: &str = "destination";

/// Required display title attribute of a destination.
pub const TITLE_ATTRIBUTE: &str = "title";

/// Optional ASCII title, preferred over [`TITLE_ATTRIBUTE`] when deriving keys.
pub const TITLE_ASCII_ATTRIBUTE: &str = "title-ascii";

/// Opaque asset identifier attribute of a destination.
pub const ASSET_ID_ATTRIBUTE: &str = "asset_id";

/// Secondary numeric identifier attribute of a destination.
pub const ATLAS_ID_ATTRIBUTE: &str = "atlas_id";

/// Tag name of a taxonomy set.
pub const TAXONOMY_TAG: &str = "taxonomy";

/// Child element holding the name of a taxonomy set.
pub const TAXONOMY_NAME_TAG: &str = "taxonomy_name";

/// Tag name of a taxonomy node.
pub const NODE_TAG: &str = "node";

/// Child element holding the display name of a taxonomy node.
pub const NODE_NAME_TAG: &str = "node_name";

/// Integer attributes copied from taxonomy nodes. Anything else is ignored.
pub const TAXONOMY_INTEGER_ATTRIBUTES: [&str; 3] =
    ["atlas_node_id", "ethyl_content_object_id", "geo_id"];

/// Token in settings-file paths replaced by the settings file's directory.
pub const HERE_TOKEN: &str = "{here}";

/// Normalize a display name into a key.
///
/// Trims, NFC-normalizes and lowercases the name, then replaces every
/// whitespace character with an underscore.
///
/// # Examples
/// ```
/// use addo::config::normalize_key;
///
/// assert_eq!(normalize_key("Africa"), "africa");
/// assert_eq!(normalize_key(" South Africa "), "south_africa");
/// ```
#[must_use]
pub fn normalize_key(name: &str) -> String {
    name.trim()
        .nfc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Output format for rendered destinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One HTML page per destination.
    #[default]
    Html,
    /// One YAML document per destination.
    Yaml,
}

/// Settings read from a YAML settings file.
///
/// Every field is optional here; command-line values are layered on top
/// with [`Settings::merge`] and the result is checked by [`Settings::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub destinations: Option<PathBuf>,
    pub taxonomy: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

/// Settings after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub destinations: PathBuf,
    pub taxonomy: Option<PathBuf>,
    pub output: PathBuf,
    pub template: Option<PathBuf>,
    pub format: OutputFormat,
}

impl Settings {
    /// Load settings from a YAML file, expanding `{here}` in path values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        let absolute = std::path::absolute(path)?;
        let here = absolute.parent().unwrap_or_else(|| Path::new("/"));
        Self::from_yaml(&yaml, here)
    }

    /// Parse settings from YAML text, expanding `{here}` to `here`.
    pub fn from_yaml(yaml: &str, here: &Path) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml_ng::from_str(yaml)?;
        let expand = |p: Option<PathBuf>| p.map(|p| expand_here(&p, here));

        Ok(Self {
            destinations: expand(settings.destinations),
            taxonomy: expand(settings.taxonomy),
            output: expand(settings.output),
            template: expand(settings.template),
            format: settings.format,
        })
    }

    /// Overlay `other` on top of `self`. Values present in `other` win.
    #[must_use]
    pub fn merge(self, other: Settings) -> Self {
        Self {
            destinations: other.destinations.or(self.destinations),
            taxonomy: other.taxonomy.or(self.taxonomy),
            output: other.output.or(self.output),
            template: other.template.or(self.template),
            format: other.format.or(self.format),
        }
    }

    /// Check required settings and that the paths point at the right kind of entry.
    pub fn validate(self) -> Result<ResolvedSettings> {
        let destinations = self
            .destinations
            .ok_or_else(|| AddoError::MissingSetting("destinations".to_string()))?;
        let output = self
            .output
            .ok_or_else(|| AddoError::MissingSetting("output".to_string()))?;

        if !output.is_dir() {
            return Err(AddoError::InvalidOutputDirectory(output));
        }
        if let Some(template) = &self.template {
            if !template.is_file() {
                return Err(AddoError::InvalidTemplate(template.clone()));
            }
        }

        Ok(ResolvedSettings {
            destinations,
            taxonomy: self.taxonomy,
            output,
            template: self.template,
            format: self.format.unwrap_or_default(),
        })
    }
}

fn expand_here(path: &Path, here: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if text.contains(HERE_TOKEN) {
        PathBuf::from(text.replace(HERE_TOKEN, &here.to_string_lossy()))
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Africa"), "africa");
        assert_eq!(normalize_key("South Africa"), "south_africa");
        assert_eq!(normalize_key("  Cape Town\t"), "cape_town");
        assert_eq!(normalize_key("Bosnia and  Herzegovina"), "bosnia_and__herzegovina");
    }

    #[test]
    fn test_normalize_key_unicode() {
        // Decomposed and precomposed forms produce the same key
        assert_eq!(normalize_key("Co\u{302}te d'Ivoire"), "côte_d'ivoire");
        assert_eq!(normalize_key("Côte d'Ivoire"), "côte_d'ivoire");
    }

    #[test]
    fn test_settings_empty() {
        let settings = Settings::from_yaml("", Path::new("/some/location")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_simple() {
        let yaml = "destinations: /data/destinations.xml\nformat: yaml\n";
        let settings = Settings::from_yaml(yaml, Path::new("/some/location")).unwrap();
        assert_eq!(
            settings.destinations,
            Some(PathBuf::from("/data/destinations.xml"))
        );
        assert_eq!(settings.format, Some(OutputFormat::Yaml));
        assert!(settings.taxonomy.is_none());
    }

    #[test]
    fn test_settings_here_expansion() {
        let yaml = "output: \"{here}/output\"\n";
        let settings = Settings::from_yaml(yaml, Path::new("/some/location")).unwrap();
        assert_eq!(settings.output, Some(PathBuf::from("/some/location/output")));
    }

    #[test]
    fn test_settings_unknown_key() {
        let result = Settings::from_yaml("colour: blue\n", Path::new("/"));
        assert!(matches!(result, Err(AddoError::Yaml(_))));
    }

    #[test]
    fn test_settings_merge_prefers_other() {
        let file = Settings {
            destinations: Some(PathBuf::from("a.xml")),
            taxonomy: Some(PathBuf::from("t.xml")),
            ..Settings::default()
        };
        let cli = Settings {
            destinations: Some(PathBuf::from("b.xml")),
            ..Settings::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.destinations, Some(PathBuf::from("b.xml")));
        assert_eq!(merged.taxonomy, Some(PathBuf::from("t.xml")));
    }

    #[test]
    fn test_validate_missing_destinations() {
        let result = Settings::default().validate();
        assert!(matches!(result, Err(AddoError::MissingSetting(ref s)) if s == "destinations"));
    }

    #[test]
    fn test_validate_missing_output() {
        let settings = Settings {
            destinations: Some(PathBuf::from("d.xml")),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(AddoError::MissingSetting(ref s)) if s == "output"
        ));
    }

    #[test]
    fn test_validate_invalid_output_dir() {
        let settings = Settings {
            destinations: Some(PathBuf::from("d.xml")),
            output: Some(PathBuf::from("/definitely/not/a/dir")),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(AddoError::InvalidOutputDirectory(_))
        ));
    }

    #[test]
    fn test_validate_ok() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            destinations: Some(PathBuf::from("d.xml")),
            output: Some(dir.path().to_path_buf()),
            ..Settings::default()
        };
        let resolved = settings.validate().unwrap();
        assert_eq!(resolved.format, OutputFormat::Html);
        assert!(resolved.taxonomy.is_none());
    }

    #[test]
    fn test_validate_invalid_template() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            destinations: Some(PathBuf::from("d.xml")),
            output: Some(dir.path().to_path_buf()),
            template: Some(dir.path().join("template.html")),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(AddoError::InvalidTemplate(_))
        ));
    }
}
