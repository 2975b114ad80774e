//! Self-caused-mutation filtering.
//!
//! Marker insertion mutates the tree, and the surrounding change-detection
//! layer sees those mutations like any other. Nodes inserted by this system
//! carry the self tag, so observers can tell the engine's own edits from
//! external ones and avoid re-triggering a scan over a container that was
//! just annotated.

use dom::{Node, mutate};

pub fn is_self_caused(node: &Node) -> bool {
    node.has_attr(mutate::ATTR_SELF)
}

/// Whether a batch of changed nodes contains anything external, i.e. a
/// rescan is actually warranted.
pub fn warrants_rescan<'a>(changed: impl IntoIterator<Item = &'a Node>) -> bool {
    changed.into_iter().any(|n| !is_self_caused(n))
}
