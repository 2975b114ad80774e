//! Text-leaf selection.
//!
//! A text leaf is the smallest element that directly owns visible text: it
//! has at least one non-whitespace text child and no descendant element that
//! would itself qualify. Markers inserted by this system never count.

use crate::mutate;
use crate::{Node, traverse};

pub fn is_text_leaf(node: &Node) -> bool {
    let Node::Element { children, .. } = node else {
        return false;
    };
    if node.has_attr(mutate::ATTR_SELF) {
        return false;
    }
    let owns_text = children
        .iter()
        .any(|c| matches!(c, Node::Text { text, .. } if !text.trim().is_empty()));
    if !owns_text {
        return false;
    }
    !children.iter().any(subtree_has_leaf)
}

fn subtree_has_leaf(node: &Node) -> bool {
    match node {
        Node::Element { children, .. } => {
            is_text_leaf(node) || children.iter().any(subtree_has_leaf)
        }
        Node::Text { .. } => false,
    }
}

/// Collect text leaves under `node` in document order. The container itself
/// is not a candidate.
pub fn collect_text_leaves<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    if let Node::Element { children, .. } = node {
        if node.has_attr(mutate::ATTR_SELF) {
            return;
        }
        for c in children {
            if is_text_leaf(c) {
                out.push(c);
            } else {
                collect_text_leaves(c, out);
            }
        }
    }
}

/// The leaf's visible text, markers excluded, surrounding whitespace kept.
pub fn leaf_text(leaf: &Node) -> String {
    traverse::text_content_string(leaf)
}
