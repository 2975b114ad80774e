//! Tree-to-string projection.
//!
//! Flattens a container's rendered text into one string and records, for
//! every byte of it, which leaf the byte belongs to. The full text is taken
//! from the container (connective whitespace and punctuation belong to it,
//! not to any leaf), then each leaf's trimmed text is located by a forward
//! search from the end of the previous match, so a word recurring earlier in
//! the string cannot capture a later leaf.

use dom::{Id, Node, leaves, traverse};
use memchr::memmem;

#[derive(Clone, Debug)]
pub struct LeafSpan {
    pub node: Id,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Dense byte-offset to leaf-index lookup. Every offset in a leaf's
/// `[start, end)` maps to that leaf; offsets in connective text are holes.
#[derive(Debug)]
pub struct OffsetMap {
    slots: Vec<Option<u32>>,
}

impl OffsetMap {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    fn fill(&mut self, start: usize, end: usize, leaf: u32) {
        let end = end.min(self.slots.len());
        let start = start.min(end);
        for slot in &mut self.slots[start..end] {
            *slot = Some(leaf);
        }
    }

    pub fn leaf_index_at(&self, offset: usize) -> Option<usize> {
        self.slots.get(offset).copied().flatten().map(|i| i as usize)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[derive(Debug)]
pub struct FlattenedText {
    pub text: String,
    pub leaves: Vec<LeafSpan>,
    pub map: OffsetMap,
    /// The container had no element leaves; `leaves` holds its
    /// whitespace-split words instead, all owned by the container node.
    pub synthetic: bool,
}

impl FlattenedText {
    pub fn leaf_at(&self, offset: usize) -> Option<&LeafSpan> {
        self.map.leaf_index_at(offset).map(|i| &self.leaves[i])
    }
}

/// Flatten `container` into text plus an offset map. Never fails: a leaf
/// whose text cannot be located degrades to a best-effort span at the
/// current cursor, and a container without leaves degrades to a synthetic
/// word-split projection of its own text.
pub fn project(container: &Node) -> FlattenedText {
    let text = traverse::text_content_string(container);
    let mut leaf_nodes = Vec::new();
    leaves::collect_text_leaves(container, &mut leaf_nodes);

    let mut flat = FlattenedText {
        map: OffsetMap::new(text.len()),
        text,
        leaves: Vec::new(),
        synthetic: false,
    };

    if leaf_nodes.is_empty() {
        if !flat.text.trim().is_empty() {
            project_words(container.id(), &mut flat);
        }
        return flat;
    }

    let mut cursor = 0usize;
    for leaf in leaf_nodes {
        let owned = leaves::leaf_text(leaf);
        let trimmed = owned.trim();
        if trimmed.is_empty() {
            continue;
        }

        let start = match find_from(&flat.text, cursor, trimmed) {
            Some(pos) => pos,
            None => {
                log::debug!(
                    target: "proof.project",
                    "leaf text {trimmed:?} not found from offset {cursor}, placing at cursor"
                );
                cursor.min(flat.text.len())
            }
        };
        let end = (start + trimmed.len()).min(flat.text.len());

        let index = flat.leaves.len() as u32;
        flat.map.fill(start, end, index);
        flat.leaves.push(LeafSpan {
            node: leaf.id(),
            start,
            end,
            text: trimmed.to_string(),
        });
        cursor = start + trimmed.len();
    }

    flat
}

fn project_words(owner: Id, flat: &mut FlattenedText) {
    flat.synthetic = true;
    let mut cursor = 0usize;
    for word in flat.text.split_whitespace() {
        let start = match find_from(&flat.text, cursor, word) {
            Some(pos) => pos,
            None => cursor.min(flat.text.len()),
        };
        let end = (start + word.len()).min(flat.text.len());
        let index = flat.leaves.len() as u32;
        flat.map.fill(start, end, index);
        flat.leaves.push(LeafSpan {
            node: owner,
            start,
            end,
            text: word.to_string(),
        });
        cursor = start + word.len();
    }
}

/// Forward substring search from `cursor`, retrying from the start of the
/// string when nothing matches past the cursor.
fn find_from(haystack: &str, cursor: usize, needle: &str) -> Option<usize> {
    if cursor < haystack.len()
        && let Some(rel) = memmem::find(haystack[cursor..].as_bytes(), needle.as_bytes())
    {
        return Some(cursor + rel);
    }
    memmem::find(haystack.as_bytes(), needle.as_bytes())
}
