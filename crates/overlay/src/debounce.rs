//! Per-container trigger coalescing.
//!
//! Tree mutations arrive in bursts (a UI rendering a message inserts its
//! words over several frames). Firing a scan per mutation would spam the
//! checker, so repeated triggers for the same container inside the window
//! are absorbed.

use dom::Id;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub struct Debouncer {
    window: Duration,
    last: HashMap<Id, Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: HashMap::new(),
        }
    }

    /// Whether a trigger for `container` should fire now. A firing trigger
    /// opens the absorption window; absorbed triggers do not extend it.
    pub fn should_fire(&mut self, container: Id) -> bool {
        let now = Instant::now();
        match self.last.get(&container) {
            Some(prev) if now.duration_since(*prev) < self.window => false,
            _ => {
                self.last.insert(container, now);
                true
            }
        }
    }

    /// Drop bookkeeping for a container that no longer exists.
    pub fn forget(&mut self, container: Id) {
        self.last.remove(&container);
    }
}
