//! Generation guard — a monotonic counter used to discard async results
//! made stale by a newer load or by logout. There is no request
//! cancellation; a stale resolve is simply dropped without rendering.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Debug, Default)]
pub struct Generation {
    counter: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new unit of work, invalidating all earlier tickets.
    pub fn begin(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Observe the current value without invalidating anything.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current() == ticket
    }

    /// Invalidate every outstanding ticket.
    pub fn invalidate(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }
}
