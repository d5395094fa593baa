//! Request hit counter
//!
//! The only process-wide mutable state. Lives outside the session state
//! machine and is shared by the counting middleware and the admin endpoints.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts served requests
pub trait HitCounter: Send + Sync {
    /// Count one request and return the new total
    fn record(&self) -> u64;

    /// Current total
    fn hits(&self) -> u64;

    /// Zero the counter
    fn reset(&self);
}

/// Lock-free `HitCounter`
#[derive(Debug, Default)]
pub struct AtomicHitCounter {
    hits: AtomicU64,
}

impl AtomicHitCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HitCounter for AtomicHitCounter {
    fn record(&self) -> u64 {
        self.hits.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}
