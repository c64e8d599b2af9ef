use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// In-memory record of which (warp, visitor) pairs have already counted
/// toward a warp's visit total in the current window.
///
/// The whole set is cleared in bulk by the reset task; there is no per-pair
/// expiry. A visit recorded one minute before the reset and one recorded one
/// minute after are both forgotten at the same instant.
pub struct VisitTracker {
    visited: RwLock<HashSet<(Uuid, Uuid)>>,
}

impl VisitTracker {
    pub fn new() -> Self {
        Self {
            visited: RwLock::new(HashSet::new()),
        }
    }

    /// True if this pair has already been counted in the current window.
    pub fn has_visited(&self, warp_id: Uuid, player_id: Uuid) -> bool {
        let visited = self.visited.read().unwrap();
        visited.contains(&(warp_id, player_id))
    }

    /// Mark the pair as counted. Idempotent.
    pub fn record(&self, warp_id: Uuid, player_id: Uuid) {
        let mut visited = self.visited.write().unwrap();
        visited.insert((warp_id, player_id));
    }

    /// Forget every recorded pair unconditionally.
    pub fn reset_all(&self) {
        let mut visited = self.visited.write().unwrap();
        let cleared = visited.len();
        visited.clear();
        if cleared > 0 {
            debug!("visit window reset: {} pair(s) forgotten", cleared);
        }
    }

    /// Number of pairs currently tracked.
    pub fn len(&self) -> usize {
        self.visited.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for VisitTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Background task that clears the visit tracker on a fixed period.
///
/// The first tick is consumed at spawn so the initial window gets a full
/// period before its reset.
pub struct VisitResetTask {
    handle: JoinHandle<()>,
}

impl VisitResetTask {
    /// Spawn the recurring reset task on the current tokio runtime.
    pub fn spawn(tracker: Arc<VisitTracker>, period: Duration) -> Self {
        info!("visit reset task started, period {:?}", period);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await; // completes immediately; skip it
            loop {
                ticker.tick().await;
                tracker.reset_all();
            }
        });
        Self { handle }
    }

    /// Stop the reset task. Called at plugin shutdown.
    pub fn shutdown(self) {
        self.handle.abort();
        info!("visit reset task stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_lifecycle() {
        let tracker = VisitTracker::new();
        let warp = Uuid::new_v4();
        let player = Uuid::new_v4();

        assert!(!tracker.has_visited(warp, player));
        tracker.record(warp, player);
        assert!(tracker.has_visited(warp, player));

        tracker.reset_all();
        assert!(!tracker.has_visited(warp, player));
        assert!(tracker.is_empty());
    }

    #[test]
    fn record_is_idempotent_and_pairwise() {
        let tracker = VisitTracker::new();
        let warp = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        tracker.record(warp, alice);
        tracker.record(warp, alice);
        assert_eq!(tracker.len(), 1);

        tracker.record(warp, bob);
        assert_eq!(tracker.len(), 2);
        assert!(!tracker.has_visited(Uuid::new_v4(), alice));
    }

    #[tokio::test]
    async fn reset_task_clears_on_period() {
        let tracker = Arc::new(VisitTracker::new());
        let task = VisitResetTask::spawn(tracker.clone(), Duration::from_millis(50));

        tracker.record(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(tracker.len(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(tracker.is_empty());

        task.shutdown();
    }

    #[tokio::test]
    async fn shutdown_stops_future_resets() {
        let tracker = Arc::new(VisitTracker::new());
        let task = VisitResetTask::spawn(tracker.clone(), Duration::from_millis(50));
        task.shutdown();

        tracker.record(Uuid::new_v4(), Uuid::new_v4());
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(tracker.len(), 1);
    }
}
