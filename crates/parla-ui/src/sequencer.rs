//! Last-submitted-wins ordering for translation results.
//!
//! Every submission takes a ticket. Only the newest ticket may write the
//! output, so a slow earlier request cannot overwrite a later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifies one submitted translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Issues tickets and tells whether one is still the latest.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
