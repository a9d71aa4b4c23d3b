//! YAML renderer.

use serde::Serialize;

use super::Renderer;
use crate::destination::{Destination, DestinationMetadata};
use crate::error::Result;
use crate::tree::TreeValue;

/// Destination representation for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlDestination<'a> {
    name: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    atlas_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parents: Vec<&'a DestinationMetadata>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<&'a DestinationMetadata>,
    content: &'a TreeValue,
}

/// Writes destinations as YAML documents, keeping content order.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlRenderer;

impl Renderer for YamlRenderer {
    fn extension(&self) -> &'static str {
        "yaml"
    }

    fn render(&self, destination: &Destination<'_>) -> Result<String> {
        let document = YamlDestination {
            name: destination.name(),
            title: destination.title(),
            asset_id: destination.asset_id(),
            atlas_id: destination.atlas_id(),
            parents: destination.parents().collect(),
            children: destination.children().collect(),
            content: destination.content(),
        };
        Ok(serde_yaml_ng::to_string(&document)?)
    }
}
