//! # Scan Debouncer
//!
//! One physical tap of a tag on the reader commonly produces a burst of
//! identical events. The debouncer suppresses repeats of the same
//! (normalized uid, action) pair inside a short window, so a burst
//! becomes exactly one cart mutation.
//!
//! The window is keyed per (uid, action) *independently*: an `add` and a
//! `remove` for the same uid do not suppress each other - a shopper can
//! legitimately drop an item in and pull it straight back out.
//!
//! The side table is bounded: once it grows past capacity, entries whose
//! window has expired are pruned. A kiosk runs for days; an append-only
//! map keyed by every tag ever seen would be a slow leak.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::protocol::ScanAction;

// =============================================================================
// Debouncer
// =============================================================================

/// Time-windowed duplicate suppression for scan events.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    capacity: usize,
    last_accepted: HashMap<(String, ScanAction), Instant>,
}

impl Debouncer {
    /// Creates a debouncer with the given window and table capacity.
    pub fn new(window: Duration, capacity: usize) -> Self {
        Debouncer {
            window,
            capacity: capacity.max(1),
            last_accepted: HashMap::new(),
        }
    }

    /// Returns true if the event should be processed, false if it is a
    /// duplicate inside the window. Accepting an event opens a fresh
    /// window for its (uid, action) pair.
    pub fn accept(&mut self, uid: &str, action: ScanAction) -> bool {
        self.accept_at(uid, action, Instant::now())
    }

    /// Clock-injected form of [`accept`](Self::accept), used by tests.
    fn accept_at(&mut self, uid: &str, action: ScanAction, now: Instant) -> bool {
        let key = (uid.to_string(), action);

        if let Some(last) = self.last_accepted.get(&key) {
            if now.duration_since(*last) < self.window {
                return false;
            }
        }

        if self.last_accepted.len() >= self.capacity {
            self.prune(now);
        }

        self.last_accepted.insert(key, now);
        true
    }

    /// Drops entries whose window has already expired.
    fn prune(&mut self, now: Instant) {
        let window = self.window;
        self.last_accepted
            .retain(|_, last| now.duration_since(*last) < window);
    }

    /// Number of tracked (uid, action) pairs. For tests and diagnostics.
    pub fn tracked(&self) -> usize {
        self.last_accepted.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn test_duplicate_within_window_suppressed() {
        let mut deb = Debouncer::new(WINDOW, 64);
        let t0 = Instant::now();

        assert!(deb.accept_at("D3D454FB", ScanAction::Add, t0));
        // Same pair 100ms later: exactly the double-read case
        assert!(!deb.accept_at("D3D454FB", ScanAction::Add, t0 + Duration::from_millis(100)));
        assert!(!deb.accept_at("D3D454FB", ScanAction::Add, t0 + Duration::from_millis(499)));
    }

    #[test]
    fn test_accepted_after_window_elapses() {
        let mut deb = Debouncer::new(WINDOW, 64);
        let t0 = Instant::now();

        assert!(deb.accept_at("D3D454FB", ScanAction::Add, t0));
        assert!(deb.accept_at("D3D454FB", ScanAction::Add, t0 + WINDOW));
    }

    #[test]
    fn test_add_and_remove_tracked_independently() {
        let mut deb = Debouncer::new(WINDOW, 64);
        let t0 = Instant::now();

        assert!(deb.accept_at("D3D454FB", ScanAction::Add, t0));
        // Remove for the same uid is a different pair - not suppressed
        assert!(deb.accept_at("D3D454FB", ScanAction::Remove, t0 + Duration::from_millis(50)));
    }

    #[test]
    fn test_distinct_uids_not_suppressed() {
        let mut deb = Debouncer::new(WINDOW, 64);
        let t0 = Instant::now();

        assert!(deb.accept_at("D3D454FB", ScanAction::Add, t0));
        assert!(deb.accept_at("B3D7F030", ScanAction::Add, t0 + Duration::from_millis(10)));
    }

    #[test]
    fn test_table_bounded_by_pruning() {
        let mut deb = Debouncer::new(WINDOW, 4);
        let t0 = Instant::now();

        for i in 0..4 {
            assert!(deb.accept_at(&format!("UID{i}"), ScanAction::Add, t0));
        }
        assert_eq!(deb.tracked(), 4);

        // Past the window, a fifth uid triggers a prune of the stale four
        assert!(deb.accept_at("UID4", ScanAction::Add, t0 + WINDOW * 2));
        assert_eq!(deb.tracked(), 1);
    }

    #[test]
    fn test_window_reopens_from_last_accepted() {
        let mut deb = Debouncer::new(WINDOW, 64);
        let t0 = Instant::now();

        assert!(deb.accept_at("X", ScanAction::Add, t0));
        // Suppressed events do NOT extend the window
        assert!(!deb.accept_at("X", ScanAction::Add, t0 + Duration::from_millis(400)));
        assert!(deb.accept_at("X", ScanAction::Add, t0 + Duration::from_millis(550)));
    }
}
