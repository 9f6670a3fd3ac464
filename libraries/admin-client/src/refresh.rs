//! Periodic re-fetch of the users collection.

use crate::snapshot::SnapshotStore;
use admin_core::UserBackend;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Shortest accepted refresh period
pub const MIN_REFRESH_PERIOD: Duration = Duration::from_secs(1);

/// Background task that refreshes a [`SnapshotStore`] on a fixed period.
///
/// The first fetch happens immediately. Failed fetches are logged by the
/// store and retried on the next tick. Dropping the task cancels it, so no
/// refresh can land after its owner is gone.
#[derive(Debug)]
pub struct RefreshTask {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTask {
    /// Start refreshing `store` from `backend` every `period`.
    ///
    /// Periods below [`MIN_REFRESH_PERIOD`] are raised to it. Must be called
    /// from within a tokio runtime.
    pub fn spawn<B>(backend: Arc<B>, store: SnapshotStore, period: Duration) -> Self
    where
        B: UserBackend + ?Sized + 'static,
    {
        let period = period.max(MIN_REFRESH_PERIOD);
        let cancel = CancellationToken::new();
        let shutdown = cancel.clone();

        let handle = tokio::spawn(async move {
            info!(period_secs = period.as_secs(), "Refresh task started");

            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = shutdown.cancelled() => {
                        debug!("Refresh task shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        // Cancellation also aborts a fetch that is in flight
                        tokio::select! {
                            () = shutdown.cancelled() => break,
                            _ = store.refresh(backend.as_ref()) => {}
                        }
                    }
                }
            }
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Signal the task to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Stop the task and wait until it has exited.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
