//! Candidate-container discovery.
//!
//! A sentence container is a subtree owning at least two text leaves.
//! Only the outermost matching subtree is a candidate; nested matches fold
//! into their ancestor. Containers already reconciled and nodes this system
//! inserted are never candidates. Discovery is heuristic and carries no
//! correctness guarantees; the engine only relies on candidates having
//! text-bearing descendants.

use dom::{Id, Node, leaves, mutate};

const MIN_LEAVES: usize = 2;

/// The root handle itself is never a candidate, only its descendants.
/// Otherwise any root with two leaves anywhere below it would swallow every
/// sibling container into one giant candidate.
pub fn find_containers(root: &Node) -> Vec<Id> {
    let mut out = Vec::new();
    for c in root.children() {
        walk(c, &mut out);
    }
    out
}

fn walk(node: &Node, out: &mut Vec<Id>) {
    let Node::Element { children, .. } = node else {
        return;
    };
    if node.has_attr(mutate::ATTR_SELF) {
        return;
    }
    // a reconciled container is retired with its whole subtree, otherwise
    // its inner rows would resurface as fresh candidates on the next scan
    if mutate::is_checked(node) {
        return;
    }

    let mut leaf_nodes = Vec::new();
    leaves::collect_text_leaves(node, &mut leaf_nodes);
    if leaf_nodes.len() >= MIN_LEAVES {
        out.push(node.id());
        return;
    }

    for c in children {
        walk(c, out);
    }
}

/// Cheap text predicate for the trigger layer: something resembling a
/// sentence has alphabetic content and more than one word.
pub fn looks_like_checkable_sentence(text: &str) -> bool {
    let t = text.trim();
    t.chars().any(char::is_alphabetic) && t.split_whitespace().count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_test_support::{elem, text, word_row};

    #[test]
    fn outermost_candidate_wins_over_nested_ones() {
        // the section holds two word rows; each row alone also qualifies,
        // but the section sees all four leaves first
        let mut root = elem(
            "main",
            vec![elem(
                "section",
                vec![word_row(&["Le", "chat"]), word_row(&["Il", "dort."])],
            )],
        );
        dom::traverse::assign_node_ids(&mut root);

        let section_id = root.children()[0].id();
        assert_eq!(find_containers(&root), vec![section_id]);
    }

    #[test]
    fn sibling_containers_are_found_independently() {
        let mut root = elem(
            "main",
            vec![word_row(&["Le", "chat"]), word_row(&["Il", "dort."])],
        );
        dom::traverse::assign_node_ids(&mut root);

        let found = find_containers(&root);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], root.children()[0].id());
        assert_eq!(found[1], root.children()[1].id());
    }

    #[test]
    fn single_leaf_subtrees_are_not_candidates() {
        let mut root = elem("section", vec![elem("div", vec![text("seul")])]);
        dom::traverse::assign_node_ids(&mut root);
        assert!(find_containers(&root).is_empty());
    }

    #[test]
    fn checked_containers_are_retired_with_their_subtree() {
        let mut section = elem(
            "section",
            vec![word_row(&["Le", "chat"]), word_row(&["Il", "dort."])],
        );
        section.set_attr(dom::mutate::ATTR_CHECKED, Some("1".to_string()));
        let mut root = elem("main", vec![section]);
        dom::traverse::assign_node_ids(&mut root);

        assert!(find_containers(&root).is_empty());
    }

    #[test]
    fn sentence_predicate_wants_words_and_letters() {
        assert!(looks_like_checkable_sentence("Le chat manges."));
        assert!(looks_like_checkable_sentence("  Il est content.  "));
        assert!(!looks_like_checkable_sentence("mot"));
        assert!(!looks_like_checkable_sentence("42 %"));
        assert!(!looks_like_checkable_sentence("   "));
        assert!(!looks_like_checkable_sentence(""));
    }
}
