use crate::mutate;
use crate::{Id, Node};

pub fn assign_node_ids(root: &mut Node) {
    fn walk(node: &mut Node, next: &mut u32) {
        // only assign if currently unset
        if node.id() == Id(0) {
            node.set_id(Id(*next));
            *next = next.wrapping_add(1);
        }

        if let Node::Element { children, .. } = node {
            for c in children {
                walk(c, next);
            }
        }
    }

    let mut next = 1;
    walk(root, &mut next);
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    if let Node::Element { children, .. } = node {
        for c in children {
            if let Some(found) = find_node_by_id(c, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    if let Node::Element { children, .. } = node {
        for c in children {
            if let Some(found) = find_node_by_id_mut(c, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Concatenate every text node under `node` in document order, whitespace
/// preserved. Subtrees inserted by this system are skipped so repeated
/// projections of an annotated tree see the same text.
pub fn text_content(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => out.push_str(text),
        Node::Element { children, .. } => {
            if node.has_attr(mutate::ATTR_SELF) {
                return;
            }
            for c in children {
                text_content(c, out);
            }
        }
    }
}

pub fn text_content_string(node: &Node) -> String {
    let mut out = String::new();
    text_content(node, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutate::ATTR_SELF;
    use std::sync::Arc;

    fn text(text: &str) -> Node {
        Node::Text {
            id: Id(0),
            text: text.to_string(),
        }
    }

    fn elem(name: &str, children: Vec<Node>) -> Node {
        Node::Element {
            id: Id(0),
            name: Arc::<str>::from(name),
            attributes: Vec::new(),
            children,
        }
    }

    #[test]
    fn assign_ids_skips_already_assigned() {
        let mut root = elem("div", vec![text("a"), elem("span", vec![text("b")])]);
        assign_node_ids(&mut root);
        let first = root.id();
        assert_ne!(first, Id(0));

        // a second pass must not renumber
        let span_id = root.children()[1].id();
        assign_node_ids(&mut root);
        assert_eq!(root.id(), first);
        assert_eq!(root.children()[1].id(), span_id);
    }

    #[test]
    fn find_by_id_reaches_nested_nodes() {
        let mut root = elem("div", vec![elem("span", vec![text("inner")])]);
        assign_node_ids(&mut root);
        let inner_id = root.children()[0].children()[0].id();
        let found = find_node_by_id(&root, inner_id).unwrap();
        assert_eq!(found.text(), Some("inner"));
        assert!(find_node_by_id(&root, Id(999)).is_none());
    }

    #[test]
    fn text_content_preserves_whitespace_and_order() {
        let root = elem(
            "div",
            vec![
                elem("span", vec![text("Le ")]),
                elem("span", vec![text("chat")]),
                text(" manges."),
            ],
        );
        assert_eq!(text_content_string(&root), "Le chat manges.");
    }

    #[test]
    fn text_content_skips_inserted_subtrees() {
        let mut marker = elem("span", vec![text(".")]);
        marker.set_attr(ATTR_SELF, Some("1".to_string()));
        let root = elem("div", vec![marker, text("mot")]);
        assert_eq!(text_content_string(&root), "mot");
    }
}
