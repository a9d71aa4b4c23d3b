//! Destination assembly from the destinations and taxonomy documents.
//!
//! The destinations document is parsed once, up front, into a `roxmltree`
//! tree that borrows the caller's source text. Construction makes a first pass
//! that builds the metadata registry and records which elements are titled;
//! [`DestinationParser::destinations`] then revisits those elements lazily,
//! building one [`Destination`] per element.

use std::slice;

use roxmltree::{Document, Node, NodeId};
use tracing::{debug, warn};

use crate::cleanup::normalize_content;
use crate::config::{
    normalize_key, ASSET_ID_ATTRIBUTE, ATLAS_ID_ATTRIBUTE, DESTINATION_TAG, TITLE_ASCII_ATTRIBUTE,
    TITLE_ATTRIBUTE,
};
use crate::destination::{Destination, DestinationMetadata, MetadataRegistry};
use crate::error::Result;
use crate::taxonomy::Taxonomies;
use crate::tree::{convert_element, ContentMap, TreeValue};
use crate::xml::{find_children, get_attribute, non_empty_attribute};

/// Builds destinations from a destinations document and an optional taxonomy.
pub struct DestinationParser<'input> {
    document: Document<'input>,
    /// Titled destination elements in document order, with their metadata.
    elements: Vec<(NodeId, DestinationMetadata)>,
    metadata: MetadataRegistry,
    taxonomies: Taxonomies,
}

impl<'input> DestinationParser<'input> {
    /// Parse the destinations document and, if given, the taxonomy document.
    ///
    /// # Errors
    /// Fails if either document is malformed. Destinations without a title
    /// are skipped with a warning, not reported as errors.
    pub fn new(source: &'input str, taxonomy: Option<&str>) -> Result<Self> {
        let taxonomies = match taxonomy {
            Some(xml) => Taxonomies::parse(xml)?,
            None => Taxonomies::new(),
        };
        Self::with_taxonomies(source, taxonomies)
    }

    /// Parse the destinations document against an already-parsed taxonomy.
    pub fn with_taxonomies(source: &'input str, taxonomies: Taxonomies) -> Result<Self> {
        let document = Document::parse(source)?;

        let elements: Vec<(NodeId, DestinationMetadata)> =
            find_children(document.root_element(), DESTINATION_TAG)
                .filter_map(|element| extract_metadata(element).map(|m| (element.id(), m)))
                .collect();

        let metadata: MetadataRegistry = elements
            .iter()
            .map(|(_, record)| (record.name.clone(), record.clone()))
            .collect();
        debug!(
            elements = elements.len(),
            destinations = metadata.len(),
            taxonomy_nodes = taxonomies.len(),
            "indexed destinations"
        );

        Ok(Self {
            document,
            elements,
            metadata,
            taxonomies,
        })
    }

    /// Metadata of every titled destination, by key.
    ///
    /// Later destinations with an already-seen key replace earlier ones here.
    #[must_use]
    pub fn metadata(&self) -> &MetadataRegistry {
        &self.metadata
    }

    #[must_use]
    pub fn taxonomies(&self) -> &Taxonomies {
        &self.taxonomies
    }

    /// Number of destinations [`destinations`](Self::destinations) yields,
    /// duplicate keys included.
    #[must_use]
    pub fn destination_count(&self) -> usize {
        self.elements.len()
    }

    /// Destinations in document order.
    ///
    /// Each call starts from the beginning. Elements without a title are
    /// skipped.
    pub fn destinations(&self) -> Destinations<'_, 'input> {
        Destinations {
            parser: self,
            elements: self.elements.iter(),
        }
    }

    fn build(&self, element: Node<'_, '_>, metadata: DestinationMetadata) -> Destination<'_> {
        let key = metadata.name.clone();

        let mut content = match convert_element(element).1 {
            TreeValue::Map(map) => map,
            _ => ContentMap::new(),
        };
        normalize_content(&mut content);

        let (children, parents) = match self.taxonomies.get(&key) {
            Some(entry) => (entry.children.clone(), entry.parents.clone()),
            None => {
                warn!(destination = %key, "destination is not in the taxonomy");
                (Vec::new(), Vec::new())
            }
        };

        let mut destination = Destination::new(&self.metadata, metadata, content, children, parents);

        if let Some(raw) = non_empty_attribute(element, ATLAS_ID_ATTRIBUTE) {
            match raw.parse::<i64>() {
                Ok(atlas_id) => destination = destination.with_atlas_id(atlas_id),
                Err(_) => warn!(destination = %key, atlas_id = raw, "ignoring non-numeric atlas id"),
            }
        }

        destination
    }
}

/// Lazy iterator over the destinations of a [`DestinationParser`].
pub struct Destinations<'p, 'input> {
    parser: &'p DestinationParser<'input>,
    elements: slice::Iter<'p, (NodeId, DestinationMetadata)>,
}

impl<'p> Iterator for Destinations<'p, '_> {
    type Item = Destination<'p>;

    fn next(&mut self) -> Option<Self::Item> {
        let parser = self.parser;
        self.elements.by_ref().find_map(|(id, metadata)| {
            let element = parser.document.get_node(*id)?;
            Some(parser.build(element, metadata.clone()))
        })
    }
}

/// Read key, title and asset id from a destination element.
///
/// The key comes from the ASCII title when present, otherwise from the title.
/// Returns `None`, with a warning, when the element has no title.
fn extract_metadata(element: Node<'_, '_>) -> Option<DestinationMetadata> {
    let Some(title) = non_empty_attribute(element, TITLE_ATTRIBUTE) else {
        warn!(
            line = element.document().text_pos_at(element.range().start).row,
            "destination without a title, skipping"
        );
        return None;
    };

    let key_source = non_empty_attribute(element, TITLE_ASCII_ATTRIBUTE).unwrap_or(title);

    Some(DestinationMetadata {
        name: normalize_key(key_source),
        title: title.to_string(),
        asset_id: get_attribute(element, ASSET_ID_ATTRIBUTE).map(str::to_string),
    })
}
