//! Latest fetched users collection, shared between the refresh task and views.

use admin_core::{UserBackend, UserRecord};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// One successful fetch of the users collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub users: Vec<UserRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Holder of the most recent [`Snapshot`].
///
/// A failed refresh leaves the previous snapshot in place. Subscribers are
/// only woken when a fetch succeeds.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    tx: Arc<watch::Sender<Option<Arc<Snapshot>>>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// The latest snapshot, or `None` before the first successful fetch.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.tx.subscribe()
    }

    /// Replace the snapshot directly.
    pub fn publish(&self, users: Vec<UserRecord>) -> Arc<Snapshot> {
        let snapshot = Arc::new(Snapshot {
            users,
            fetched_at: Utc::now(),
        });
        self.tx.send_replace(Some(Arc::clone(&snapshot)));
        snapshot
    }

    /// Fetch the collection and publish it.
    ///
    /// # Errors
    /// Returns the backend error; the previous snapshot is kept.
    pub async fn refresh<B>(&self, backend: &B) -> admin_core::Result<Arc<Snapshot>>
    where
        B: UserBackend + ?Sized,
    {
        match backend.list_users().await {
            Ok(users) => {
                debug!(count = users.len(), "Snapshot refreshed");
                Ok(self.publish(users))
            }
            Err(e) => {
                warn!(error = %e, "Refresh failed, keeping previous snapshot");
                Err(e)
            }
        }
    }
}
