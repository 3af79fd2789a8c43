//! Debounced commit gate for text inputs.
//!
//! Alt-text edits are buffered briefly before they reach the store. Each
//! keystroke arms a new ticket and invalidates the previous one; cancelling
//! the gate (card removed, session torn down) invalidates every outstanding
//! ticket so stale text is never committed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Buffer window for alt-text commits.
pub const ALT_TEXT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Generation counter shared by all tickets of one input.
#[derive(Debug, Clone, Default)]
pub struct DebounceGate {
    generation: Arc<AtomicU64>,
}

/// Permission to commit one buffered edit, valid until the gate moves on.
#[derive(Debug, Clone)]
pub struct DebounceTicket {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl DebounceGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a ticket for the latest edit, invalidating all previous tickets.
    #[must_use]
    pub fn arm(&self) -> DebounceTicket {
        let issued = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        DebounceTicket {
            generation: Arc::clone(&self.generation),
            issued,
        }
    }

    /// Invalidate every outstanding ticket without arming a new one.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl DebounceTicket {
    /// Whether this ticket still represents the latest edit.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_wins() {
        let gate = DebounceGate::new();

        let first = gate.arm();
        assert!(first.is_current());

        let second = gate.arm();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn cancel_invalidates_outstanding_tickets() {
        let gate = DebounceGate::new();
        let ticket = gate.arm();

        gate.cancel();
        assert!(!ticket.is_current());
    }

    #[test]
    fn arming_after_cancel_issues_a_fresh_ticket() {
        let gate = DebounceGate::new();
        gate.cancel();

        let ticket = gate.arm();
        assert!(ticket.is_current());
    }
}
