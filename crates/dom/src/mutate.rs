//! Marker insertion and the attribute tags that make it idempotent.
//!
//! Three attributes identify system-owned state in the tree:
//! - [`ATTR_SELF`] tags every node this system inserts, so mutation
//!   observers and re-projection can filter them out,
//! - [`ATTR_MARK`] tags a node that already carries a marker,
//! - [`ATTR_CHECKED`] is the per-container "already reconciled" flag.

use crate::{Id, Node};
use std::sync::Arc;

pub const ATTR_SELF: &str = "data-proof";
pub const ATTR_MARK: &str = "data-proof-mark";
pub const ATTR_CHECKED: &str = "data-proof-checked";

pub const MARKER_TEXT: &str = ".";

/// Build a fresh marker node: `<span data-proof data-proof-mark>.</span>`.
/// Ids are left unset; rerun `assign_node_ids` after insertion if needed.
pub fn make_marker() -> Node {
    Node::Element {
        id: Id(0),
        name: Arc::<str>::from("span"),
        attributes: vec![
            (ATTR_SELF.to_string(), Some("1".to_string())),
            (ATTR_MARK.to_string(), Some("1".to_string())),
        ],
        children: vec![Node::Text {
            id: Id(0),
            text: MARKER_TEXT.to_string(),
        }],
    }
}

pub fn is_marker(node: &Node) -> bool {
    node.has_attr(ATTR_MARK) && node.has_attr(ATTR_SELF)
}

/// Whether the first contentful child of `node` is already a marker.
pub fn leads_with_marker(node: &Node) -> bool {
    node.children()
        .iter()
        .find(|c| is_contentful(c))
        .is_some_and(is_marker)
}

fn is_contentful(node: &Node) -> bool {
    match node {
        Node::Text { text, .. } => !text.trim().is_empty(),
        Node::Element { .. } => true,
    }
}

/// Insert a marker before `node`'s first contentful child, or as its only
/// child if it is empty. Returns `false` without touching the tree when the
/// node is already marked.
pub fn insert_marker(node: &mut Node) -> bool {
    if node.has_attr(ATTR_MARK) {
        return false;
    }
    if leads_with_marker(node) {
        // attribute went missing but the marker is there; repair the tag
        node.set_attr(ATTR_MARK, Some("1".to_string()));
        return false;
    }

    let Some(children) = node.children_mut() else {
        log::warn!(target: "proof.dom", "marker target is a text node, skipping");
        return false;
    };

    let at = children
        .iter()
        .position(is_contentful)
        .unwrap_or(children.len());
    children.insert(at, make_marker());
    node.set_attr(ATTR_MARK, Some("1".to_string()));
    true
}

pub fn mark_checked(container: &mut Node) {
    container.set_attr(ATTR_CHECKED, Some("1".to_string()));
}

pub fn is_checked(container: &Node) -> bool {
    container.has_attr(ATTR_CHECKED)
}
