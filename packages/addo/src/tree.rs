//! Generic content tree built from nested XML elements.
//!
//! Every element becomes either a text scalar (leaf elements) or an ordered
//! mapping from child tag name to child value. When a tag repeats under one
//! parent, the slot for that tag is promoted to a list holding every
//! occurrence in document order.

use roxmltree::Node;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::xml::{element_children, get_tag_name, has_element_children};

/// A value in the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValue {
    /// Trimmed text of a leaf element.
    Text(String),
    /// Child elements keyed by tag name, in document order.
    Map(ContentMap),
    /// Every occurrence of a repeated tag, in document order.
    List(Vec<TreeValue>),
}

impl TreeValue {
    /// Get the text if this is a scalar.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get the mapping if this is a mapping.
    #[must_use]
    pub fn as_map(&self) -> Option<&ContentMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get the items if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[TreeValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Default for TreeValue {
    fn default() -> Self {
        Self::Map(ContentMap::new())
    }
}

impl From<&str> for TreeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TreeValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<ContentMap> for TreeValue {
    fn from(map: ContentMap) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<TreeValue>> for TreeValue {
    fn from(items: Vec<TreeValue>) -> Self {
        Self::List(items)
    }
}

/// Insertion-ordered mapping from tag name to [`TreeValue`].
///
/// Content trees are small and read far more often than written, so a
/// vector of pairs keeps document order without an extra dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMap {
    entries: Vec<(String, TreeValue)>,
}

impl ContentMap {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut TreeValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set `key` to `value`, keeping the key's position if it already exists.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: TreeValue) -> Option<TreeValue> {
        let key = key.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Add a converted child element under `key`.
    ///
    /// The first occurrence is stored as-is. The second occurrence turns the
    /// slot into a list of both values; later occurrences are appended to it.
    /// Converted elements are never lists themselves, so an existing list
    /// always means the tag already repeated.
    pub fn insert_repeated(&mut self, key: impl Into<String>, value: TreeValue) {
        let key = key.into();
        match self.get_mut(&key) {
            None => self.entries.push((key, value)),
            Some(TreeValue::List(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::take(existing);
                *existing = TreeValue::List(vec![first, value]);
            }
        }
    }

    /// Remove `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<TreeValue> {
        self.position(key).map(|index| self.entries.remove(index).1)
    }

    /// The single entry of a one-entry mapping.
    #[must_use]
    pub fn single_entry(&self) -> Option<(&str, &TreeValue)> {
        match self.entries.as_slice() {
            [(key, value)] => Some((key.as_str(), value)),
            _ => None,
        }
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TreeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<K: Into<String>> FromIterator<(K, TreeValue)> for ContentMap {
    fn from_iter<I: IntoIterator<Item = (K, TreeValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for ContentMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for TreeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Map(map) => map.serialize(serializer),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Convert an element and its subtree into `(tag name, value)`.
///
/// Leaf elements become their trimmed text, or an empty mapping when they
/// carry no text at all. Elements with children become a mapping of their
/// converted children, with repeated tags promoted to lists.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use addo::tree::{convert_element, TreeValue};
///
/// let doc = Document::parse("<list><item>a</item><item>b</item></list>").unwrap();
/// let (tag, value) = convert_element(doc.root_element());
///
/// assert_eq!(tag, "list");
/// let items = value.as_map().unwrap().get("item").unwrap();
/// assert_eq!(items, &TreeValue::List(vec!["a".into(), "b".into()]));
/// ```
pub fn convert_element<'a>(node: Node<'a, '_>) -> (&'a str, TreeValue) {
    let tag = get_tag_name(node);

    if !has_element_children(node) {
        let value = match node.text() {
            Some(text) => TreeValue::Text(text.trim().to_string()),
            None => TreeValue::Map(ContentMap::new()),
        };
        return (tag, value);
    }

    let mut map = ContentMap::new();
    for child in element_children(node) {
        let (child_tag, child_value) = convert_element(child);
        map.insert_repeated(child_tag, child_value);
    }

    (tag, TreeValue::Map(map))
}
