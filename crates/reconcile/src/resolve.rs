//! Span resolution.
//!
//! Checkers routinely return nested and re-triggered spans: a word-level
//! spelling hit inside a sentence-level grammar hit, or the same range
//! twice. Placing those raw would stack multiple markers around the same
//! text, so overlaps are settled here first: exact duplicates drop, the
//! larger span wins containment, the longer span wins partial overlap with
//! ties going to the span accepted first.

use crate::span::ErrorSpan;

/// Reduce `spans` (all in one coordinate space) to a conflict-free set.
/// Idempotent; the output is never larger than the input. Output order is
/// unspecified; placement re-sorts.
pub fn resolve(mut spans: Vec<ErrorSpan>) -> Vec<ErrorSpan> {
    spans.sort_by_key(|s| (s.offset, s.length));

    let mut accepted: Vec<ErrorSpan> = Vec::new();
    'incoming: for span in spans {
        for slot in accepted.iter_mut() {
            if slot.offset == span.offset && slot.length == span.length {
                continue 'incoming;
            }
            if slot.contains(&span) {
                continue 'incoming;
            }
            if span.contains(slot) {
                *slot = span;
                continue 'incoming;
            }
            if slot.overlaps(&span) {
                if span.length > slot.length {
                    *slot = span;
                }
                continue 'incoming;
            }
        }
        accepted.push(span);
    }
    accepted
}
