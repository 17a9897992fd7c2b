//! Shared state between the tracker thread and the daemon main loop.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use crate::route::RouteProgress;

/// Thread-safe navigation state.
///
/// The tracker thread is the writer; the daemon main loop (and tests) read.
#[derive(Debug, Default)]
pub struct SharedNavState {
    /// Latest route progress snapshot
    progress: RwLock<RouteProgress>,

    /// Hard interface failure reason, if any (distinct from soft signal loss)
    interface_failure: RwLock<Option<String>>,

    /// Shutdown signal for graceful termination
    shutdown: AtomicBool,

    /// Number of beacon deliveries processed (for status reporting)
    deliveries: AtomicU64,
}

impl SharedNavState {
    /// Create empty shared state
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest route progress
    pub fn progress(&self) -> RouteProgress {
        self.progress
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Publish a new progress snapshot (tracker thread)
    pub fn update_progress(&self, progress: RouteProgress) {
        if let Ok(mut guard) = self.progress.write() {
            *guard = progress;
        }
    }

    /// Hard interface failure reason, if the beacon interface failed
    pub fn interface_failure(&self) -> Option<String> {
        self.interface_failure
            .read()
            .ok()
            .and_then(|guard| guard.clone())
    }

    /// Record a hard interface failure (tracker thread)
    pub fn set_interface_failure(&self, reason: String) {
        if let Ok(mut guard) = self.interface_failure.write() {
            *guard = Some(reason);
        }
    }

    /// Signal shutdown
    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    /// Check if shutdown is signaled
    pub fn should_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Count one processed delivery (tracker thread)
    pub fn record_delivery(&self) {
        self.deliveries.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of deliveries processed so far
    pub fn delivery_count(&self) -> u64 {
        self.deliveries.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_round_trip() {
        let shared = SharedNavState::new();
        assert_eq!(shared.progress(), RouteProgress::default());

        let progress = RouteProgress {
            current_node: Some(3),
            remaining: vec![4, 5],
            furthest_index: Some(1),
            arrived: false,
            signal_lost: false,
        };
        shared.update_progress(progress.clone());
        assert_eq!(shared.progress(), progress);
    }

    #[test]
    fn test_failure_and_shutdown_flags() {
        let shared = SharedNavState::new();
        assert!(shared.interface_failure().is_none());
        assert!(!shared.should_shutdown());

        shared.set_interface_failure("unsupported hardware".to_string());
        shared.signal_shutdown();

        assert_eq!(
            shared.interface_failure().as_deref(),
            Some("unsupported hardware")
        );
        assert!(shared.should_shutdown());
    }

    #[test]
    fn test_delivery_counter() {
        let shared = SharedNavState::new();
        shared.record_delivery();
        shared.record_delivery();
        assert_eq!(shared.delivery_count(), 2);
    }
}
