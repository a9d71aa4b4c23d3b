//! Helpers for navigating `roxmltree` element trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use addo::xml::get_tag_name;
///
/// let xml = r#"<destinations><destination/></destinations>"#;
/// let doc = Document::parse(xml).unwrap();
/// let destination = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(destination), "destination");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use addo::xml::find_child;
///
/// let xml = r#"<node><node_name>Africa</node_name></node>"#;
/// let doc = Document::parse(xml).unwrap();
/// let node = doc.root_element();
///
/// assert!(find_child(node, "node_name").is_some());
/// assert!(find_child(node, "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name, in document order.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Get all element children of a node.
///
/// Text nodes, comments and processing instructions are excluded.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Check whether a node has at least one element child.
pub fn has_element_children(node: Node<'_, '_>) -> bool {
    node.children().any(|child| child.is_element())
}

/// Get the text content of a node, trimmed.
///
/// Returns an empty string when the node has no text.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Get an attribute value, trimmed, treating an empty value as absent.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use addo::xml::non_empty_attribute;
///
/// let doc = Document::parse(r#"<destination title=" Africa " asset_id=""/>"#).unwrap();
/// let root = doc.root_element();
///
/// assert_eq!(non_empty_attribute(root, "title"), Some("Africa"));
/// assert_eq!(non_empty_attribute(root, "asset_id"), None);
/// assert_eq!(non_empty_attribute(root, "missing"), None);
/// ```
pub fn non_empty_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
