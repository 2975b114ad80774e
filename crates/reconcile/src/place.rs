//! Marker placement.
//!
//! Spans are processed in descending offset order so an insertion never
//! shifts the offsets of spans still waiting. For each span the owning leaf
//! is found by text match first (the checker's flagged text is more reliable
//! than its offsets once whitespace normalization is involved), then by
//! offset-map lookup with a bounded probe. Containers without element
//! leaves instead get the marker spliced into their own text at the flagged
//! position.

use crate::project::{FlattenedText, LeafSpan};
use crate::span::ErrorSpan;
use dom::{Id, Node, mutate, traverse};
use memchr::memmem;
use std::collections::HashSet;
use tools::utf8::slice_clamped;

/// How far the offset lookup probes around an unmapped position before
/// giving up, in bytes.
const PROBE_WINDOW: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed,
    SkippedDuplicate,
    FallbackUsed,
    Unresolved,
}

/// Per-span outcomes for one placement pass. Diagnostic only: callers
/// proceed regardless of individual failures.
#[derive(Debug, Default)]
pub struct PlacementReport {
    pub entries: Vec<(ErrorSpan, PlacementOutcome)>,
}

impl PlacementReport {
    pub fn count(&self, outcome: PlacementOutcome) -> usize {
        self.entries.iter().filter(|(_, o)| *o == outcome).count()
    }

    pub fn placed(&self) -> usize {
        self.count(PlacementOutcome::Placed)
    }

    pub fn unresolved(&self) -> usize {
        self.count(PlacementOutcome::Unresolved)
    }
}

/// Insert one marker per resolved span into `container`. Idempotent: leaves
/// that already carry a marker are skipped, as is any leaf hit twice within
/// this call when text match and offset match disagree across spans.
pub fn place(
    container: &mut Node,
    flattened: &FlattenedText,
    spans: &[ErrorSpan],
) -> PlacementReport {
    let mut ordered: Vec<&ErrorSpan> = spans.iter().collect();
    ordered.sort_by(|a, b| b.offset.cmp(&a.offset));

    let mut processed: HashSet<Id> = HashSet::new();
    let mut report = PlacementReport::default();
    for span in ordered {
        let outcome = place_one(container, flattened, span, &mut processed);
        report.entries.push(((*span).clone(), outcome));
    }
    report
}

fn place_one(
    container: &mut Node,
    flattened: &FlattenedText,
    span: &ErrorSpan,
    processed: &mut HashSet<Id>,
) -> PlacementOutcome {
    let raw = slice_clamped(&flattened.text, span.offset, span.end());
    let span_text = raw.trim();

    if flattened.synthetic {
        return place_in_container_text(container, flattened, span, span_text);
    }

    let target = find_leaf_by_text(flattened, span_text)
        .or_else(|| find_leaf_by_offset(flattened, span.offset, span.length));

    let Some(leaf) = target else {
        log::warn!(
            target: "proof.place",
            "no leaf for span at {}+{} ({span_text:?})",
            span.offset,
            span.length
        );
        return mark_container_last_resort(container);
    };

    if !processed.insert(leaf.node) {
        return PlacementOutcome::SkippedDuplicate;
    }

    if !plausibly_matches(&leaf.text, span_text) {
        log::warn!(
            target: "proof.place",
            "leaf {:?} does not resemble flagged text {span_text:?}, inserting anyway",
            leaf.text
        );
    }

    match traverse::find_node_by_id_mut(container, leaf.node) {
        Some(node) => {
            if mutate::insert_marker(node) {
                PlacementOutcome::Placed
            } else {
                PlacementOutcome::SkippedDuplicate
            }
        }
        None => {
            log::warn!(target: "proof.place", "leaf {:?} vanished before placement", leaf.node);
            mark_container_last_resort(container)
        }
    }
}

/// Method 1: match the flagged text against leaf texts, case-insensitively.
/// Exact equality or containment either way wins first; a shared-prefix pass
/// catches near-matches after that.
fn find_leaf_by_text<'a>(flattened: &'a FlattenedText, span_text: &str) -> Option<&'a LeafSpan> {
    let needle = span_text.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    for leaf in &flattened.leaves {
        let hay = leaf.text.trim().to_lowercase();
        if hay.is_empty() {
            continue;
        }
        if hay == needle || hay.contains(&needle) || needle.contains(&hay) {
            return Some(leaf);
        }
    }

    for leaf in &flattened.leaves {
        let hay = leaf.text.trim().to_lowercase();
        let prefix = hay.chars().count().min(needle.chars().count());
        if prefix > 0 && hay.chars().take(prefix).eq(needle.chars().take(prefix)) {
            return Some(leaf);
        }
    }

    None
}

/// Method 2: offset-map lookup, then leaf-range intersection, then a bounded
/// probe forward and backward from the span offset.
fn find_leaf_by_offset(
    flattened: &FlattenedText,
    offset: usize,
    length: usize,
) -> Option<&LeafSpan> {
    if let Some(leaf) = flattened.leaf_at(offset) {
        return Some(leaf);
    }

    for leaf in &flattened.leaves {
        if offset >= leaf.start && offset < leaf.end {
            return Some(leaf);
        }
        if offset < leaf.end && offset.saturating_add(length) > leaf.start {
            return Some(leaf);
        }
    }

    for probe in offset..offset.saturating_add(PROBE_WINDOW).min(flattened.map.len()) {
        if let Some(i) = flattened.map.leaf_index_at(probe) {
            return Some(&flattened.leaves[i]);
        }
    }
    for probe in (offset.saturating_sub(PROBE_WINDOW)..offset.min(flattened.map.len())).rev() {
        if let Some(i) = flattened.map.leaf_index_at(probe) {
            return Some(&flattened.leaves[i]);
        }
    }

    None
}

fn plausibly_matches(leaf_text: &str, span_text: &str) -> bool {
    if span_text.is_empty() {
        return false;
    }
    let a = leaf_text.trim().to_lowercase();
    let b = span_text.to_lowercase();
    a == b || a.contains(&b) || b.contains(&a)
}

enum Splice {
    Inserted,
    AlreadyMarked,
    NotHere,
}

/// Method 3: the container has no element leaves, so the marker goes into
/// the container's own text at the exact flagged position, splitting the
/// text node there.
fn place_in_container_text(
    container: &mut Node,
    flattened: &FlattenedText,
    span: &ErrorSpan,
    span_text: &str,
) -> PlacementOutcome {
    let position = if span_text.is_empty() {
        span.offset.min(flattened.text.len())
    } else {
        find_from(&flattened.text, span.offset, span_text)
            .unwrap_or_else(|| span.offset.min(flattened.text.len()))
    };

    let mut remaining = position;
    match splice_marker_at(container, &mut remaining) {
        Splice::Inserted => PlacementOutcome::FallbackUsed,
        Splice::AlreadyMarked => PlacementOutcome::SkippedDuplicate,
        Splice::NotHere => {
            log::warn!(
                target: "proof.place",
                "no text position {position} in container for {span_text:?}"
            );
            mark_container_last_resort(container)
        }
    }
}

fn splice_marker_at(node: &mut Node, remaining: &mut usize) -> Splice {
    if node.has_attr(mutate::ATTR_SELF) {
        return Splice::NotHere;
    }
    let Some(children) = node.children_mut() else {
        return Splice::NotHere;
    };

    let mut i = 0;
    while i < children.len() {
        let text_len = match &children[i] {
            Node::Text { text, .. } => Some(text.len()),
            Node::Element { .. } => None,
        };
        match text_len {
            Some(len) if *remaining < len => {
                let at = match &children[i] {
                    Node::Text { text, .. } => {
                        tools::utf8::clamp_to_char_boundary(text, *remaining)
                    }
                    Node::Element { .. } => 0,
                };
                if at == 0 {
                    if i > 0 && mutate::is_marker(&children[i - 1]) {
                        return Splice::AlreadyMarked;
                    }
                    children.insert(i, mutate::make_marker());
                } else {
                    let tail = match &mut children[i] {
                        Node::Text { text, .. } => text.split_off(at),
                        Node::Element { .. } => String::new(),
                    };
                    children.insert(i + 1, mutate::make_marker());
                    if !tail.is_empty() {
                        children.insert(
                            i + 2,
                            Node::Text {
                                id: Id(0),
                                text: tail,
                            },
                        );
                    }
                }
                return Splice::Inserted;
            }
            Some(len) => *remaining -= len,
            // marker subtrees refuse the recursion at their own door and
            // contribute no text, so they are stepped over untouched
            None => match splice_marker_at(&mut children[i], remaining) {
                Splice::NotHere => {}
                done => return done,
            },
        }
        i += 1;
    }
    Splice::NotHere
}

/// Absolute last resort: mark the container itself, at most once.
fn mark_container_last_resort(container: &mut Node) -> PlacementOutcome {
    if mutate::insert_marker(container) {
        PlacementOutcome::FallbackUsed
    } else {
        PlacementOutcome::Unresolved
    }
}

/// Forward search from `cursor`, retrying from the start on a miss.
fn find_from(haystack: &str, cursor: usize, needle: &str) -> Option<usize> {
    if cursor < haystack.len()
        && let Some(rel) = memmem::find(haystack[cursor..].as_bytes(), needle.as_bytes())
    {
        return Some(cursor + rel);
    }
    memmem::find(haystack.as_bytes(), needle.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::project;
    use core_types::CheckKind;
    use dom_test_support::{bare_text_container, word_row};

    fn span(offset: usize, length: usize) -> ErrorSpan {
        ErrorSpan {
            offset,
            length,
            kind: CheckKind::Spelling,
            message: "mot inconnu".to_string(),
            replacements: vec!["manger".to_string()],
        }
    }

    fn marker_count(node: &Node) -> usize {
        let mut n = usize::from(mutate::is_marker(node));
        for c in node.children() {
            n += marker_count(c);
        }
        n
    }

    fn marked_leaf_texts(node: &Node, out: &mut Vec<String>) {
        if node.has_attr(mutate::ATTR_MARK) && !mutate::is_marker(node) {
            out.push(dom::traverse::text_content_string(node).trim().to_string());
        }
        for c in node.children() {
            marked_leaf_texts(c, out);
        }
    }

    #[test]
    fn span_lands_on_the_matching_leaf() {
        // "Le chat manges." with the checker flagging "manges" at 8+6
        let mut row = word_row(&["Le", "chat", "manges."]);
        dom::traverse::assign_node_ids(&mut row);
        let flat = project(&row);

        let report = place(&mut row, &flat, &[span(8, 6)]);

        assert_eq!(report.placed(), 1);
        let mut marked = Vec::new();
        marked_leaf_texts(&row, &mut marked);
        assert_eq!(marked, vec!["manges."]);
        assert_eq!(marker_count(&row), 1);
    }

    #[test]
    fn placement_is_idempotent_across_calls() {
        let mut row = word_row(&["Le", "chat", "manges."]);
        dom::traverse::assign_node_ids(&mut row);
        let flat = project(&row);
        let spans = [span(8, 6)];

        let first = place(&mut row, &flat, &spans);
        assert_eq!(first.placed(), 1);

        // same spans again: projection unchanged, nothing new inserted
        let flat = project(&row);
        let second = place(&mut row, &flat, &spans);
        assert_eq!(second.placed(), 0);
        assert_eq!(second.count(PlacementOutcome::SkippedDuplicate), 1);
        assert_eq!(marker_count(&row), 1);
    }

    #[test]
    fn two_spans_on_one_leaf_insert_once() {
        let mut row = word_row(&["Le", "chat", "manges."]);
        dom::traverse::assign_node_ids(&mut row);
        let flat = project(&row);

        // resolver imperfection: both spans resolve to the same leaf
        let report = place(&mut row, &flat, &[span(8, 6), span(10, 3)]);

        assert_eq!(report.placed(), 1);
        assert_eq!(report.count(PlacementOutcome::SkippedDuplicate), 1);
        assert_eq!(marker_count(&row), 1);
    }

    #[test]
    fn descending_order_keeps_earlier_offsets_valid() {
        let mut row = word_row(&["Le", "chat", "manges."]);
        dom::traverse::assign_node_ids(&mut row);
        let flat = project(&row);

        let report = place(&mut row, &flat, &[span(0, 2), span(8, 6)]);

        assert_eq!(report.placed(), 2);
        let mut marked = Vec::new();
        marked_leaf_texts(&row, &mut marked);
        assert_eq!(marked, vec!["Le", "manges."]);
    }

    #[test]
    fn offset_in_connective_space_probes_to_a_leaf() {
        let mut row = word_row(&["Le", "chat", "manges."]);
        dom::traverse::assign_node_ids(&mut row);
        let flat = project(&row);

        // offset 2 is the space after "Le": an offset-map hole, and the
        // flagged text trims to nothing so the text pass cannot claim it
        let report = place(&mut row, &flat, &[span(2, 1)]);

        assert_eq!(report.placed(), 1);
        let mut marked = Vec::new();
        marked_leaf_texts(&row, &mut marked);
        assert_eq!(marked, vec!["chat"]);
    }

    #[test]
    fn leafless_container_gets_marker_at_exact_text_position() {
        let mut container = bare_text_container("Bonjour le monde.");
        dom::traverse::assign_node_ids(&mut container);
        let flat = project(&container);
        assert!(flat.synthetic);

        let report = place(&mut container, &flat, &[span(8, 2)]); // "le"

        assert_eq!(report.count(PlacementOutcome::FallbackUsed), 1);
        assert_eq!(marker_count(&container), 1);
        // the text node was split around the insertion point
        let texts: Vec<Option<&str>> = container.children().iter().map(|c| c.text()).collect();
        assert_eq!(texts[0], Some("Bonjour "));
        assert_eq!(texts[2], Some("le monde."));
    }

    #[test]
    fn leafless_container_placement_is_idempotent() {
        let mut container = bare_text_container("Bonjour le monde.");
        dom::traverse::assign_node_ids(&mut container);
        let flat = project(&container);
        place(&mut container, &flat, &[span(8, 2)]);

        let flat = project(&container);
        let second = place(&mut container, &flat, &[span(8, 2)]);
        assert_eq!(second.count(PlacementOutcome::SkippedDuplicate), 1);
        assert_eq!(marker_count(&container), 1);
    }

    #[test]
    fn unmatchable_span_falls_back_to_container_marking_once() {
        let mut row = word_row(&["Le", "chat"]);
        dom::traverse::assign_node_ids(&mut row);
        let mut flat = project(&row);
        // simulate a projection hole: wipe leaves and map so nothing matches
        flat.leaves.clear();
        flat.map = crate::project::OffsetMap::new(flat.text.len());

        let report = place(&mut row, &flat, &[span(0, 2), span(3, 4)]);

        assert_eq!(report.count(PlacementOutcome::FallbackUsed), 1);
        assert_eq!(report.unresolved(), 1);
        assert_eq!(marker_count(&row), 1);
        assert!(row.has_attr(mutate::ATTR_MARK));
    }

    #[test]
    fn accented_text_matches_case_insensitively() {
        let mut row = word_row(&["Éléphant", "gris"]);
        dom::traverse::assign_node_ids(&mut row);
        let flat = project(&row);

        let report = place(&mut row, &flat, &[span(0, 10)]); // "Éléphant" is 10 bytes

        assert_eq!(report.placed(), 1);
        let mut marked = Vec::new();
        marked_leaf_texts(&row, &mut marked);
        assert_eq!(marked, vec!["Éléphant"]);
    }
}
