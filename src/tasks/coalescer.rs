//! Run-once coalescing of room change notifications

use std::sync::Arc;
use tokio::sync::Notify;

/// Collapses any number of `notify()` calls into a single pending update.
///
/// Cloning shares the pending flag, so the clone handed to a room listener
/// and the one awaited by the controller see the same batch.
#[derive(Debug, Clone, Default)]
pub struct UpdateCoalescer {
    pending: Arc<Notify>,
}

impl UpdateCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an update. Safe to call from any thread, any number of times.
    pub fn notify(&self) {
        self.pending.notify_one();
    }

    /// Wait for the next batch of notifications, consuming it
    pub async fn next_batch(&self) {
        self.pending.notified().await;
    }
}
