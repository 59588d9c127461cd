//! Stale Response Guard
//!
//! Requests are never aborted. Each load takes a ticket from a generation
//! counter and applies its result only while the ticket is still current.
//! Starting a newer load or dropping the owner invalidates older tickets.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use leptos::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new operation, superseding all earlier tickets
    pub fn begin(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidate every outstanding ticket (e.g. on unmount)
    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Generation owned by the current component; unmounting invalidates it
pub fn use_generation() -> StoredValue<Generation> {
    let generation = Generation::new();
    let on_unmount = generation.clone();
    on_cleanup(move || on_unmount.invalidate());
    StoredValue::new(generation)
}

/// Mount flag for actions that must not supersede each other
#[derive(Debug, Clone)]
pub struct Mounted(Arc<AtomicBool>);

impl Mounted {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Default for Mounted {
    fn default() -> Self {
        Self::new()
    }
}

/// Cleared when the current component unmounts
pub fn use_mounted() -> StoredValue<Mounted> {
    let mounted = Mounted::new();
    let on_unmount = mounted.clone();
    on_cleanup(move || on_unmount.unmount());
    StoredValue::new(mounted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let generation = Generation::new();
        let first = generation.begin();
        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_invalidate_drops_outstanding() {
        let generation = Generation::new();
        let ticket = generation.begin();
        generation.invalidate();
        assert!(!generation.is_current(ticket));
    }

    #[test]
    fn test_clones_share_counter() {
        let generation = Generation::new();
        let ticket = generation.begin();
        let owner = generation.clone();
        owner.begin();
        assert!(!generation.is_current(ticket));
    }

    #[test]
    fn test_unmount_invalidates_tickets_taken_before() {
        let owner = Owner::new();
        let stored = owner.with(use_generation);
        let generation = stored.get_value();
        let ticket = generation.begin();
        owner.cleanup();
        assert!(!generation.is_current(ticket));
        // Only the clone taken before the await survives the owner
        assert!(stored.try_get_value().is_none());
    }

    #[test]
    fn test_unmount_clears_mounted_flag() {
        let owner = Owner::new();
        let stored = owner.with(use_mounted);
        let mounted = stored.get_value();
        assert!(mounted.is_mounted());
        owner.cleanup();
        assert!(!mounted.is_mounted());
        assert!(stored.try_get_value().is_none());
    }
}
