//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::{CacheStore, Clock};

// == Sweep Handle ==
/// Lifetime handle for a running sweep task.
///
/// The task stops when [`SweepHandle::stop`] is called or when the handle is
/// dropped, whichever comes first.
#[derive(Debug)]
pub struct SweepHandle {
    shutdown_tx: mpsc::Sender<()>,
    join: JoinHandle<()>,
}

impl SweepHandle {
    /// Signals the task to stop. Returns immediately.
    pub fn stop(&self) {
        // Full means a stop is already pending, Closed means the task is gone.
        let _ = self.shutdown_tx.try_send(());
    }

    /// Returns true while the task has not yet exited.
    pub fn is_running(&self) -> bool {
        !self.join.is_finished()
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(self) {
        self.stop();
        let _ = self.join.await;
    }
}

/// Spawns a background task that removes expired entries every `interval`.
///
/// Each tick takes the write lock on the store, drops every entry expired as
/// of `clock.now()`, and releases the lock.
///
/// # Panics
/// Panics if `interval` is zero or if called outside a Tokio runtime.
pub fn spawn_sweep_task(
    store: Arc<RwLock<CacheStore>>,
    clock: Arc<dyn Clock>,
    interval: Duration,
) -> SweepHandle {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

    let join = tokio::spawn(async move {
        debug!("Starting TTL sweep task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the first tick (immediate)
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = {
                        let mut store_guard = store.write().await;
                        store_guard.cleanup_expired(clock.now())
                    };

                    if removed > 0 {
                        info!("TTL sweep: removed {} expired entries", removed);
                    } else {
                        debug!("TTL sweep: no expired entries found");
                    }
                }
                // Either an explicit stop or every sender dropped
                _ = shutdown_rx.recv() => {
                    break;
                }
            }
        }

        debug!("TTL sweep task stopped");
    });

    SweepHandle { shutdown_tx, join }
}
