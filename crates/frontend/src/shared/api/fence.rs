use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Latest-wins fencing for in-flight analytics queries.
///
/// Filters can change faster than the API answers, and responses arrive in
/// any order. Each load takes a ticket before the request goes out and
/// checks it before applying the response; a stale response is dropped
/// instead of overwriting a newer one.
#[derive(Clone, Default)]
pub struct RequestSequence {
    current: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, invalidating every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::Relaxed) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_invalidates_older() {
        let seq = RequestSequence::new();
        let first = seq.begin();
        let second = seq.begin();

        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_separate_sequences_are_independent() {
        // One sequence per concern: starting a table load must not
        // invalidate an in-flight picker request, and vice versa.
        let table = RequestSequence::new();
        let picker = RequestSequence::new();
        let table_ticket = table.begin();
        let picker_ticket = picker.begin();

        assert!(table.is_current(table_ticket));
        assert!(picker.is_current(picker_ticket));
    }

    #[test]
    fn test_clones_share_the_sequence() {
        let seq = RequestSequence::new();
        let ticket = seq.begin();
        let clone = seq.clone();
        let newer = clone.begin();

        assert!(!seq.is_current(ticket));
        assert!(seq.is_current(newer));
    }
}
