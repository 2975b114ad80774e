//! Node builders shared by tests across the workspace.
//!
//! Builders leave every id unset so trees can be composed freely; run
//! `assign_node_ids` once on the finished tree before anything looks nodes
//! up by id.

use dom::{Id, Node};
use std::sync::Arc;

pub fn text(t: &str) -> Node {
    Node::Text {
        id: Id(0),
        text: t.to_string(),
    }
}

pub fn elem(name: &str, children: Vec<Node>) -> Node {
    Node::Element {
        id: Id(0),
        name: Arc::<str>::from(name),
        attributes: Vec::new(),
        children,
    }
}

/// The word-per-element shape the engine is built for: one leaf `<div>` per
/// word, connective single spaces owned by the container.
pub fn word_row(words: &[&str]) -> Node {
    let mut children = Vec::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            children.push(text(" "));
        }
        children.push(elem("div", vec![text(word)]));
    }
    elem("div", children)
}

/// A container with no element leaves, only direct text.
pub fn bare_text_container(t: &str) -> Node {
    elem("div", vec![text(t)])
}
