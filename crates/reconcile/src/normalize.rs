//! Whitespace normalization with an invertible offset map.
//!
//! Checkers are string-oriented: sending them raw rendered text full of
//! newlines and run-on spaces produces offsets that do not line up with
//! visually distinct words. So the text is collapsed before sending and
//! every answer is translated back through the map built here.
//!
//! A collapsed whitespace run maps to the run's *last* original byte. That
//! makes offsets inside a collapsed run approximate by up to the run length;
//! spans starting on the first character after a run map exactly, which is
//! the case that matters for word-anchored markers.

use crate::span::ErrorSpan;

#[derive(Debug)]
pub struct NormalizedText {
    pub text: String,
    /// `to_original[i]` is the original byte offset for normalized byte `i`;
    /// one extra trailing entry maps `text.len()` to the original end.
    to_original: Vec<usize>,
}

impl NormalizedText {
    /// Map a byte offset in the normalized text back into the original.
    /// Total over `[0, text.len()]` and non-decreasing; out-of-range input
    /// clamps to the end.
    pub fn original_offset(&self, normalized: usize) -> usize {
        match self.to_original.as_slice() {
            [] => 0,
            slice => slice[normalized.min(slice.len() - 1)],
        }
    }

    /// Rewrite a span from normalized-text coordinates into original-text
    /// coordinates.
    pub fn span_to_original(&self, span: &ErrorSpan) -> ErrorSpan {
        let start = self.original_offset(span.offset);
        let end = self.original_offset(span.end()).max(start);
        ErrorSpan {
            offset: start,
            length: end - start,
            ..span.clone()
        }
    }
}

/// Collapse every maximal whitespace run to one space, trim the ends, and
/// record the byte-level alignment as it is produced.
pub fn normalize(original: &str) -> NormalizedText {
    let mut text = String::with_capacity(original.len());
    let mut to_original = Vec::with_capacity(original.len() + 1);

    let mut chars = original.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch.is_whitespace() {
            let mut last = idx;
            while let Some(&(next_idx, next_ch)) = chars.peek() {
                if !next_ch.is_whitespace() {
                    break;
                }
                last = next_idx;
                chars.next();
            }
            // leading and trailing runs vanish entirely
            if text.is_empty() || chars.peek().is_none() {
                continue;
            }
            text.push(' ');
            to_original.push(last);
        } else {
            for byte in 0..ch.len_utf8() {
                to_original.push(idx + byte);
            }
            text.push(ch);
        }
    }

    // end sentinel: one past the last kept content byte
    let end = to_original
        .last()
        .map(|&o| o + 1)
        .unwrap_or(0);
    to_original.push(end);

    NormalizedText { text, to_original }
}
