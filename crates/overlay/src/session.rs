//! The scan -> check -> place driver.
//!
//! `scan` projects every new candidate container and hands back one job per
//! container worth sending to the checker. The caller dispatches the jobs
//! however it likes (the stock client runs one thread per request) and feeds
//! each outcome to `complete`, which resolves the returned spans, translates
//! them out of checker coordinates, places markers, and marks the container
//! reconciled: exactly once, success or failure, so no container is ever
//! reprocessed.
//!
//! The captured projection is used for placement rather than a fresh one:
//! offsets in the checker's answer refer to the text as it was sent, and the
//! projection that produced that text is the only one they are valid for.

use crate::classify;
use checker::CheckOutcome;
use core_types::RequestId;
use dom::{Id, Node, mutate, traverse};
use reconcile::{ErrorSpan, FlattenedText, NormalizedText, PlacementReport};
use std::collections::{HashMap, HashSet};
use tools::utf16;

/// One outbound checker request: submit `text`, report the outcome under
/// `request_id`.
#[derive(Debug)]
pub struct CheckJob {
    pub request_id: RequestId,
    pub container: Id,
    pub text: String,
}

struct Pending {
    container: Id,
    flattened: FlattenedText,
    normalized: NormalizedText,
}

#[derive(Default)]
pub struct Session {
    next_request: RequestId,
    pending: HashMap<RequestId, Pending>,
    in_flight: HashSet<Id>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Discover unchecked candidate containers under `root` and prepare one
    /// job per container worth checking. Containers whose text fails the
    /// sentence predicate are marked reconciled on the spot so they never
    /// come back; containers with a request already in flight are left
    /// alone.
    pub fn scan(&mut self, root: &mut Node) -> Vec<CheckJob> {
        let mut jobs = Vec::new();
        for id in classify::find_containers(root) {
            if self.in_flight.contains(&id) {
                continue;
            }
            let Some(container) = traverse::find_node_by_id(root, id) else {
                continue;
            };

            let flattened = reconcile::project(container);
            let normalized = reconcile::normalize(&flattened.text);

            if !classify::looks_like_checkable_sentence(&normalized.text) {
                log::debug!(
                    target: "proof.overlay",
                    "container {id:?} text {:?} not checkable, marking",
                    normalized.text
                );
                if let Some(container) = traverse::find_node_by_id_mut(root, id) {
                    mutate::mark_checked(container);
                }
                continue;
            }

            self.next_request += 1;
            let request_id = self.next_request;
            jobs.push(CheckJob {
                request_id,
                container: id,
                text: normalized.text.clone(),
            });
            self.in_flight.insert(id);
            self.pending.insert(
                request_id,
                Pending {
                    container: id,
                    flattened,
                    normalized,
                },
            );
        }
        jobs
    }

    /// Feed one checker outcome back into the tree. Unknown request ids are
    /// a no-op. Errors and empty answers still mark the container
    /// reconciled; only a container that vanished from the tree yields
    /// `None` without a report.
    pub fn complete(&mut self, root: &mut Node, outcome: &CheckOutcome) -> Option<PlacementReport> {
        let pending = self.pending.remove(&outcome.request_id)?;
        self.in_flight.remove(&pending.container);

        let Some(container) = traverse::find_node_by_id_mut(root, pending.container) else {
            log::warn!(
                target: "proof.overlay",
                "container {:?} vanished before completion of request {}",
                pending.container,
                outcome.request_id
            );
            return None;
        };

        if let Some(err) = &outcome.error {
            log::debug!(
                target: "proof.overlay",
                "request {} failed ({err}), treating as zero matches",
                outcome.request_id
            );
        }

        // checker offsets are UTF-16 units of the normalized string; make
        // them byte spans before anything else sees them
        let spans: Vec<ErrorSpan> = outcome
            .matches
            .iter()
            .map(|m| {
                let (start, end) = utf16::byte_range(&pending.normalized.text, m.offset, m.length);
                ErrorSpan {
                    offset: start,
                    length: end - start,
                    kind: m.kind,
                    message: m.message.clone(),
                    replacements: m.replacements.clone(),
                }
            })
            .collect();

        let resolved = reconcile::resolve(spans);
        let translated: Vec<ErrorSpan> = resolved
            .iter()
            .map(|s| pending.normalized.span_to_original(s))
            .collect();

        let report = reconcile::place(container, &pending.flattened, &translated);
        mutate::mark_checked(container);

        log::debug!(
            target: "proof.overlay",
            "request {}: {} placed, {} unresolved",
            outcome.request_id,
            report.placed(),
            report.unresolved()
        );
        Some(report)
    }
}
