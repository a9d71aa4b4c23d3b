//! Cleanup rules for redundant nesting in destination content.
//!
//! The destinations format wraps some sections in extra levels that carry no
//! information. Two rules are applied to the top-level content mapping:
//!
//! - `history`: a mapping with exactly one entry is replaced by that entry's value.
//! - `introductory`: `introductory/introduction/<single entry>` is promoted to a
//!   top-level `introduction` and `introductory` is removed.

use tracing::debug;

use crate::tree::{ContentMap, TreeValue};

/// Top-level key unwrapped by the history rule.
pub const HISTORY_KEY: &str = "history";

/// Top-level key removed by the introduction rule.
pub const INTRODUCTORY_KEY: &str = "introductory";

/// Key under `introductory`, and the top-level key it is promoted to.
pub const INTRODUCTION_KEY: &str = "introduction";

/// Apply every cleanup rule to a destination's top-level content.
///
/// Content without `history` or `introductory` keys is left untouched.
pub fn normalize_content(content: &mut ContentMap) {
    collapse_history(content);
    collapse_introduction(content);
}

/// Replace a single-entry `history` mapping with its only value.
fn collapse_history(content: &mut ContentMap) {
    let inner = match content.get(HISTORY_KEY) {
        Some(TreeValue::Map(history)) => history.single_entry().map(|(_, v)| v.clone()),
        _ => None,
    };

    if let Some(inner) = inner {
        debug!("collapsing nested history");
        content.insert(HISTORY_KEY, inner);
    }
}

/// Promote `introductory/introduction/<single entry>` to `introduction`.
///
/// The single entry under `introduction` is normally `overview`; it is taken
/// by position, whatever its name.
fn collapse_introduction(content: &mut ContentMap) {
    let promoted = match content.get(INTRODUCTORY_KEY) {
        Some(TreeValue::Map(introductory)) => match introductory.single_entry() {
            Some((INTRODUCTION_KEY, TreeValue::Map(introduction))) => {
                introduction.single_entry().map(|(_, v)| v.clone())
            }
            _ => None,
        },
        _ => None,
    };

    if let Some(promoted) = promoted {
        debug!("promoting introductory overview to introduction");
        content.insert(INTRODUCTION_KEY, promoted);
        content.remove(INTRODUCTORY_KEY);
    }
}
