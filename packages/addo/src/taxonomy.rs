//! Taxonomy parsing.
//!
//! A taxonomy document holds one or more named taxonomy sets, each a tree of
//! `node` elements. Parsing flattens every set into a single lookup keyed by
//! the normalized node name, recording for each node its ancestor chain and
//! its direct children.
//!
//! ```xml
//! <taxonomies>
//!  <taxonomy>
//!   <taxonomy_name>World</taxonomy_name>
//!   <node atlas_node_id="111222" ethyl_content_object_id="1" geo_id="1">
//!    <node_name>Africa</node_name>
//!    <node atlas_node_id="111333" ethyl_content_object_id="3" geo_id="4">
//!      <node_name>South Africa</node_name>
//!    </node>
//!   </node>
//!  </taxonomy>
//! </taxonomies>
//! ```

use std::collections::{BTreeMap, HashMap};

use roxmltree::{Document, Node};
use tracing::{debug, warn};

use crate::config::{
    normalize_key, NODE_NAME_TAG, NODE_TAG, TAXONOMY_INTEGER_ATTRIBUTES, TAXONOMY_NAME_TAG,
    TAXONOMY_TAG,
};
use crate::error::{AddoError, Result};
use crate::xml::{find_child, find_children, get_text};

/// One node of a taxonomy, flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyEntry {
    /// Display name from `node_name`.
    pub name: String,

    /// Whitelisted integer attributes present on the node.
    ///
    /// An attribute that is present but empty maps to `None`.
    pub properties: BTreeMap<String, Option<i64>>,

    /// Keys of the ancestors, root first, immediate parent last.
    pub parents: Vec<String>,

    /// Keys of the direct children, in document order.
    pub children: Vec<String>,
}

impl TaxonomyEntry {
    /// Look up a whitelisted property.
    ///
    /// Returns `None` when the attribute was absent, `Some(None)` when it was
    /// present but empty.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<Option<i64>> {
        self.properties.get(name).copied()
    }

    /// Key of the immediate parent, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parents.last().map(String::as_str)
    }
}

/// A named taxonomy set and every key it produced, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomySet {
    /// Text of `taxonomy_name`, or `None` when missing or empty.
    pub name: Option<String>,

    /// Keys produced by this set, duplicates included.
    pub keys: Vec<String>,
}

/// Flattened lookup over every node of one or more taxonomy documents.
///
/// Keys are unique across the whole lookup; a node whose key was already
/// seen replaces the earlier entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomies {
    entries: HashMap<String, TaxonomyEntry>,
    sets: Vec<TaxonomySet>,
}

impl Taxonomies {
    /// Create an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a taxonomy document.
    ///
    /// # Errors
    /// Returns [`AddoError::XmlParse`] for malformed XML and
    /// [`AddoError::InvalidInteger`] for a whitelisted attribute that is not
    /// an integer. Nodes without a name are skipped with a warning.
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)?;
        let mut taxonomies = Self::new();

        for taxonomy in find_children(doc.root_element(), TAXONOMY_TAG) {
            let name = find_child(taxonomy, TAXONOMY_NAME_TAG)
                .map(get_text)
                .filter(|s| !s.is_empty());

            let mut visited = Vec::new();
            for node in find_children(taxonomy, NODE_TAG) {
                walk_node(node, Vec::new(), &mut visited)?;
            }

            debug!(
                taxonomy = name.as_deref().unwrap_or("<unnamed>"),
                nodes = visited.len(),
                "parsed taxonomy set"
            );

            let keys = visited.iter().map(|(key, _)| key.clone()).collect();
            taxonomies.entries.extend(visited);
            taxonomies.sets.push(TaxonomySet { name, keys });
        }

        Ok(taxonomies)
    }

    /// Parse another taxonomy document and merge it into this lookup.
    ///
    /// Nothing is merged unless the whole document parses.
    pub fn extend_from_xml(&mut self, xml: &str) -> Result<()> {
        let other = Self::parse(xml)?;
        self.entries.extend(other.entries);
        self.sets.extend(other.sets);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TaxonomyEntry> {
        self.entries.get(key)
    }

    /// Number of distinct node keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Taxonomy sets in document order.
    #[must_use]
    pub fn sets(&self) -> &[TaxonomySet] {
        &self.sets
    }

    /// Find a taxonomy set by name. Unnamed sets match `None`.
    #[must_use]
    pub fn set(&self, name: Option<&str>) -> Option<&TaxonomySet> {
        self.sets.iter().find(|set| set.name.as_deref() == name)
    }

    /// Direct children of `key`, or `None` if the key is not in the taxonomy.
    #[must_use]
    pub fn children_of(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(|entry| entry.children.as_slice())
    }

    /// Ancestors of `key`, root first, or `None` if the key is not in the taxonomy.
    #[must_use]
    pub fn parents_of(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(|entry| entry.parents.as_slice())
    }
}

/// Visit `node` and its subtree depth-first, appending `(key, entry)` pairs
/// to `visited` in document order.
///
/// `ancestors` is owned so sibling subtrees never see each other's chains.
fn walk_node(
    node: Node<'_, '_>,
    ancestors: Vec<String>,
    visited: &mut Vec<(String, TaxonomyEntry)>,
) -> Result<()> {
    let name = find_child(node, NODE_NAME_TAG)
        .map(get_text)
        .filter(|s| !s.is_empty());
    let Some(name) = name else {
        warn!(
            parents = ?ancestors,
            "taxonomy node without node_name, skipping it and its descendants"
        );
        return Ok(());
    };

    let key = normalize_key(&name);
    let properties = parse_properties(node, &name)?;

    let index = visited.len();
    visited.push((
        key.clone(),
        TaxonomyEntry {
            name,
            properties,
            parents: ancestors.clone(),
            children: Vec::new(),
        },
    ));

    let mut chain = ancestors;
    chain.push(key.clone());
    for child in find_children(node, NODE_TAG) {
        walk_node(child, chain.clone(), visited)?;
    }

    // A descendant is a direct child when its chain ends at this node's key.
    let children: Vec<String> = visited[index + 1..]
        .iter()
        .filter(|(_, entry)| entry.parent() == Some(key.as_str()))
        .map(|(child_key, _)| child_key.clone())
        .collect();
    visited[index].1.children = children;

    Ok(())
}

/// Read the whitelisted integer attributes of a node.
fn parse_properties(node: Node<'_, '_>, name: &str) -> Result<BTreeMap<String, Option<i64>>> {
    let mut properties = BTreeMap::new();

    for attribute in TAXONOMY_INTEGER_ATTRIBUTES {
        let Some(raw) = node.attribute(attribute) else {
            continue;
        };
        let raw = raw.trim();
        let value = if raw.is_empty() {
            None
        } else {
            let parsed = raw.parse::<i64>().map_err(|_| AddoError::InvalidInteger {
                attribute: attribute.to_string(),
                value: raw.to_string(),
                node: name.to_string(),
            })?;
            Some(parsed)
        };
        properties.insert(attribute.to_string(), value);
    }

    Ok(properties)
}
