//! Destination entity handed to renderers.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::tree::{ContentMap, TreeValue};

/// Per-destination metadata collected in a first pass over the destinations document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationMetadata {
    /// Normalized key, also used as the output file stem.
    pub name: String,

    /// Display title, trimmed.
    pub title: String,

    /// Opaque asset identifier, passed through as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
}

/// Destination metadata by normalized key.
///
/// Destinations refer to each other through keys into this registry rather
/// than owning each other. A registry may be incomplete.
pub type MetadataRegistry = HashMap<String, DestinationMetadata>;

/// A destination with its cleaned content and taxonomy relations.
#[derive(Debug, Clone)]
pub struct Destination<'a> {
    registry: &'a MetadataRegistry,
    name: String,
    title: String,
    asset_id: Option<String>,
    atlas_id: Option<i64>,
    content: TreeValue,
    children: Vec<String>,
    parents: Vec<String>,
}

impl<'a> Destination<'a> {
    /// Create a destination.
    ///
    /// `children` and `parents` are keys resolved against `registry` on demand.
    #[must_use]
    pub fn new(
        registry: &'a MetadataRegistry,
        metadata: DestinationMetadata,
        content: ContentMap,
        children: Vec<String>,
        parents: Vec<String>,
    ) -> Self {
        Self {
            registry,
            name: metadata.name,
            title: metadata.title,
            asset_id: metadata.asset_id,
            atlas_id: None,
            content: TreeValue::Map(content),
            children,
            parents,
        }
    }

    /// Attach the secondary numeric identifier.
    #[must_use]
    pub fn with_atlas_id(mut self, atlas_id: i64) -> Self {
        self.atlas_id = Some(atlas_id);
        self
    }

    /// Normalized key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn asset_id(&self) -> Option<&str> {
        self.asset_id.as_deref()
    }

    #[must_use]
    pub fn atlas_id(&self) -> Option<i64> {
        self.atlas_id
    }

    /// The whole content tree; always a mapping.
    #[must_use]
    pub fn content(&self) -> &TreeValue {
        &self.content
    }

    /// Walk the content tree along `path`.
    ///
    /// Returns `None` when a segment is missing or the value reached so far is
    /// not a mapping. An empty path returns the whole content.
    ///
    /// # Examples
    /// ```
    /// use addo::destination::{Destination, DestinationMetadata, MetadataRegistry};
    /// use addo::tree::{ContentMap, TreeValue};
    ///
    /// let registry = MetadataRegistry::new();
    /// let history: ContentMap = [("introduction", TreeValue::from("History Introduction"))]
    ///     .into_iter()
    ///     .collect();
    /// let content: ContentMap = [("history", TreeValue::Map(history))].into_iter().collect();
    /// let metadata = DestinationMetadata {
    ///     name: "africa".to_string(),
    ///     title: "Africa".to_string(),
    ///     asset_id: None,
    /// };
    /// let destination = Destination::new(&registry, metadata, content, vec![], vec![]);
    ///
    /// assert_eq!(
    ///     destination.get_content(&["history", "introduction"]),
    ///     Some(&TreeValue::from("History Introduction"))
    /// );
    /// assert_eq!(destination.get_content(&["missing"]), None);
    /// ```
    #[must_use]
    pub fn get_content(&self, path: &[&str]) -> Option<&TreeValue> {
        path.iter()
            .try_fold(&self.content, |current, segment| current.as_map()?.get(segment))
    }

    /// Text at `path`, if the value there is a scalar.
    #[must_use]
    pub fn get_text(&self, path: &[&str]) -> Option<&str> {
        self.get_content(path).and_then(TreeValue::as_text)
    }

    /// Children known to the registry. Unknown keys are logged and skipped.
    pub fn children(&self) -> impl Iterator<Item = &'a DestinationMetadata> + '_ {
        self.resolve(&self.children, "child")
    }

    /// Parents known to the registry, root first. Unknown keys are logged and skipped.
    pub fn parents(&self) -> impl Iterator<Item = &'a DestinationMetadata> + '_ {
        self.resolve(&self.parents, "parent")
    }

    /// Number of child keys, whether or not they resolve.
    #[must_use]
    pub fn number_of_children(&self) -> usize {
        self.children.len()
    }

    /// Number of parent keys, whether or not they resolve.
    #[must_use]
    pub fn number_of_parents(&self) -> usize {
        self.parents.len()
    }

    /// Raw child keys.
    #[must_use]
    pub fn child_keys(&self) -> &[String] {
        &self.children
    }

    /// Raw parent keys.
    #[must_use]
    pub fn parent_keys(&self) -> &[String] {
        &self.parents
    }

    fn resolve<'s>(
        &'s self,
        keys: &'s [String],
        relation: &'static str,
    ) -> impl Iterator<Item = &'a DestinationMetadata> + 's {
        let registry = self.registry;
        keys.iter().filter_map(move |key| {
            let found = registry.get(key);
            if found.is_none() {
                warn!(
                    destination = %self.name,
                    key = %key,
                    "registry does not know {relation}"
                );
            }
            found
        })
    }
}
