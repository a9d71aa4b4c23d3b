//! Addo - Render destination pages from destinations and taxonomy XML.
//!
//! Two XML documents go in: a destinations document holding the content of
//! every destination, and a taxonomy document describing how destinations
//! nest. Addo merges them and produces one output document per destination.
//!
//! # Example
//!
//! ```
//! use addo::DestinationParser;
//!
//! let destinations = r#"<destinations>
//!   <destination title="Africa"><weather>Hot</weather></destination>
//!   <destination title="South Africa"/>
//! </destinations>"#;
//! let taxonomy = r#"<taxonomies><taxonomy>
//!   <taxonomy_name>World</taxonomy_name>
//!   <node><node_name>Africa</node_name>
//!     <node><node_name>South Africa</node_name></node>
//!   </node>
//! </taxonomy></taxonomies>"#;
//!
//! let parser = DestinationParser::new(destinations, Some(taxonomy)).unwrap();
//! let africa = parser.destinations().next().unwrap();
//!
//! assert_eq!(africa.name(), "africa");
//! assert_eq!(africa.get_text(&["weather"]), Some("Hot"));
//! assert_eq!(africa.children().next().unwrap().title, "South Africa");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Format constants, key normalization and settings
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML utilities
//! - [`tree`]: Generic content tree converted from XML elements
//! - [`cleanup`]: Cleanup rules for redundant content nesting
//! - [`taxonomy`]: Taxonomy parsing into a flat lookup
//! - [`destination`]: Destination entity and metadata registry
//! - [`parser`]: Destination assembly
//! - [`render`]: HTML and YAML renderers
//! - [`cli`]: Command-line interface

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod destination;
pub mod error;
pub mod parser;
pub mod render;
pub mod taxonomy;
pub mod tree;
pub mod xml;

// Re-export commonly used items
pub use config::normalize_key;
pub use destination::{Destination, DestinationMetadata, MetadataRegistry};
pub use error::{AddoError, Result};
pub use parser::{DestinationParser, Destinations};
pub use taxonomy::{Taxonomies, TaxonomyEntry, TaxonomySet};
pub use tree::{convert_element, ContentMap, TreeValue};
