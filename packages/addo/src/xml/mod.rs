//! XML utilities.

mod utils;

pub use utils::{
    element_children, find_child, find_children, get_attribute, get_tag_name, get_text,
    has_element_children, non_empty_attribute,
};
