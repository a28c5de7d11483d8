//! In-flight guard for incremental loading.
//!
//! ```text
//! begin()      -> ticket, unless a load is already running or the view closed
//! supersede()  -> ticket that cancels whatever is running
//! complete(r)  -> Some(r) only for the newest live ticket
//! close()      -> every outstanding and future result is discarded
//! ```
//!
//! Each ticket carries the generation it was issued under. A ticket is stale
//! as soon as a newer generation exists, and stale results are dropped on
//! arrival instead of being merged into the view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
struct GuardState {
    generation: AtomicU64,
    in_flight: AtomicBool,
    closed: AtomicBool,
}

/// Shared handle. Clones observe the same latch and generation.
#[derive(Debug, Clone, Default)]
pub struct LoadCoordinator {
    state: Arc<GuardState>,
}

impl LoadCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load if none is running. Repeated triggers while one is in
    /// flight return `None`.
    #[must_use]
    pub fn begin(&self) -> Option<LoadTicket> {
        if self.is_closed() {
            return None;
        }
        self.state
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(self.issue())
    }

    /// Start a load that cancels any running one (for example after the
    /// filter changed and the old results no longer apply).
    #[must_use]
    pub fn supersede(&self) -> Option<LoadTicket> {
        if self.is_closed() {
            return None;
        }
        self.state.in_flight.store(true, Ordering::Release);
        Some(self.issue())
    }

    /// Mark the owning view inactive.
    pub fn close(&self) {
        self.state.closed.store(true, Ordering::Release);
        self.state.generation.fetch_add(1, Ordering::AcqRel);
        self.state.in_flight.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.state.in_flight.load(Ordering::Acquire)
    }

    fn issue(&self) -> LoadTicket {
        let generation = self.state.generation.fetch_add(1, Ordering::AcqRel) + 1;
        LoadTicket {
            generation,
            state: Arc::clone(&self.state),
        }
    }
}

/// Proof that a load was started. Dropping it releases the latch if it is
/// still the newest ticket.
#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
    state: Arc<GuardState>,
}

impl LoadTicket {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// True once a newer ticket was issued or the view closed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
            || self.state.generation.load(Ordering::Acquire) != self.generation
    }

    /// Hand back the load's result. Stale results come back as `None`.
    pub fn complete<T>(self, result: T) -> Option<T> {
        let live = !self.is_cancelled();
        drop(self);
        live.then_some(result)
    }
}

impl Drop for LoadTicket {
    fn drop(&mut self) {
        if self.state.generation.load(Ordering::Acquire) == self.generation {
            self.state.in_flight.store(false, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn repeated_begin_is_ignored_while_in_flight() {
        let guard = LoadCoordinator::new();
        let first = guard.begin().expect("first load starts");
        assert!(guard.begin().is_none());
        assert!(guard.begin().is_none());
        assert_eq!(first.complete(7), Some(7));
        assert!(!guard.is_in_flight());
        assert!(guard.begin().is_some());
    }

    #[test]
    fn supersede_discards_older_result() {
        let guard = LoadCoordinator::new();
        let old = guard.begin().unwrap();
        let new = guard.supersede().unwrap();
        assert!(old.is_cancelled());
        assert_eq!(old.complete("stale"), None);
        // the stale completion must not release the newer load's latch
        assert!(guard.is_in_flight());
        assert_eq!(new.complete("fresh"), Some("fresh"));
        assert!(!guard.is_in_flight());
    }

    #[test]
    fn close_discards_everything() {
        let guard = LoadCoordinator::new();
        let ticket = guard.begin().unwrap();
        guard.close();
        assert_eq!(ticket.complete(1), None);
        assert!(guard.begin().is_none());
        assert!(guard.supersede().is_none());
    }

    #[test]
    fn dropped_ticket_releases_latch() {
        let guard = LoadCoordinator::new();
        drop(guard.begin().unwrap());
        assert!(guard.begin().is_some());
    }

    #[test]
    fn clones_share_state() {
        let guard = LoadCoordinator::new();
        let other = guard.clone();
        let _ticket = guard.begin().unwrap();
        assert!(other.begin().is_none());
    }
}
