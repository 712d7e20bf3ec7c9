use log::{error, info};
use std::sync::Arc;
use std::time::Duration;

use crate::store::{now_ms, TableNotFound, TableStore};

/// Turns a trigger request into a delayed replay-ready mutation.
///
/// Each accepted trigger spawns its own one-shot timer; nothing is cancelled
/// or deduplicated, so overlapping triggers on the same table all complete
/// and the last completion wins the timestamp. A real implementation would
/// cut a clip here instead of sleeping.
pub struct ReplayScheduler {
    store: Arc<TableStore>,
    delay: Duration,
    replay_url: String,
}

impl ReplayScheduler {
    pub fn new(store: Arc<TableStore>, delay: Duration, replay_url: String) -> Self {
        Self {
            store,
            delay,
            replay_url,
        }
    }

    /// Accept a trigger for a table, or fail synchronously when the id is
    /// unknown. On success the caller gets an immediate acknowledgement while
    /// the state flip happens in the background after the configured delay.
    pub fn schedule(&self, id: u32) -> Result<(), TableNotFound> {
        if !self.store.contains(id) {
            return Err(TableNotFound(id));
        }

        info!("Trigger received for Table {}", id);

        let store = Arc::clone(&self.store);
        let delay = self.delay;
        let replay_url = self.replay_url.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match store.mark_replay_ready(id, now_ms(), &replay_url) {
                Ok(()) => info!("Replay ready for Table {}", id),
                // Unreachable while the table set is fixed for the process
                // lifetime, but the timer outlives the existence check.
                Err(e) => error!("Replay completion failed: {}", e),
            }
        });

        Ok(())
    }
}
