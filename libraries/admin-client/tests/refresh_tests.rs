//! Snapshot refresh tests against a mocked backend.
//!
//! Time is paused so the refresh period can be exercised without waiting.

use admin_client::{RefreshTask, SnapshotStore, MIN_REFRESH_PERIOD};
use admin_core::{AdminError, NewUser, UserBackend, UserId, UserRecord, UserUpdate};
use async_trait::async_trait;
use mockall::mock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

mock! {
    pub Backend {}

    #[async_trait]
    impl UserBackend for Backend {
        async fn list_users(&self) -> admin_core::Result<Vec<UserRecord>>;
        async fn create_user(&self, user: &NewUser) -> admin_core::Result<()>;
        async fn update_user(&self, id: &UserId, update: &UserUpdate) -> admin_core::Result<()>;
        async fn delete_user(&self, id: &UserId) -> admin_core::Result<()>;
    }
}

fn users(count: usize) -> Vec<UserRecord> {
    (0..count)
        .map(|i| {
            UserRecord::new(
                i.to_string(),
                format!("user{i}"),
                format!("user{i}@example.com"),
                "viewer",
            )
        })
        .collect()
}

/// Backend whose n-th fetch (from zero) returns n users
fn counting_backend(calls: Arc<AtomicUsize>) -> MockBackend {
    let mut backend = MockBackend::new();
    backend
        .expect_list_users()
        .returning(move || Ok(users(calls.fetch_add(1, Ordering::SeqCst))));
    backend
}

#[tokio::test]
async fn test_refresh_publishes_snapshot() {
    let mut backend = MockBackend::new();
    backend
        .expect_list_users()
        .times(1)
        .returning(|| Ok(users(3)));

    let store = SnapshotStore::new();
    let mut updates = store.subscribe();
    assert!(store.current().is_none());

    let snapshot = store.refresh(&backend).await.unwrap();

    assert_eq!(snapshot.users.len(), 3);
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().as_ref().map(|s| s.users.len()), Some(3));
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut backend = MockBackend::new();
    backend.expect_list_users().returning(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(users(2))
        } else {
            Err(AdminError::network("connection refused"))
        }
    });

    let store = SnapshotStore::new();
    let first = store.refresh(&backend).await.unwrap();
    let mut updates = store.subscribe();

    let err = store.refresh(&backend).await.unwrap_err();

    assert!(err.is_network());
    assert!(!updates.has_changed().unwrap());
    let current = store.current().unwrap();
    assert!(Arc::ptr_eq(&current, &first));
    assert_eq!(current.users.len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_task_fetches_immediately_then_on_period() {
    let calls = Arc::new(AtomicUsize::new(0));
    let backend = Arc::new(counting_backend(Arc::clone(&calls)));
    let store = SnapshotStore::new();

    let task = RefreshTask::spawn(backend, store.clone(), Duration::from_secs(30));

    // Ticks at 0s, 30s, 60s and 90s
    tokio::time::sleep(Duration::from_secs(95)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(store.current().map(|s| s.users.len()), Some(3));

    task.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_dropped_task_stops_refreshing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let backend = Arc::new(counting_backend(Arc::clone(&calls)));
    let store = SnapshotStore::new();

    let task = RefreshTask::spawn(backend, store.clone(), Duration::from_secs(30));
    tokio::time::sleep(Duration::from_secs(35)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    drop(task);
    tokio::time::sleep(Duration::from_secs(120)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_waits_for_exit() {
    let calls = Arc::new(AtomicUsize::new(0));
    let backend = Arc::new(counting_backend(calls));

    let task = RefreshTask::spawn(backend, SnapshotStore::new(), Duration::from_secs(30));
    assert!(!task.is_finished());

    task.cancel();
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(task.is_finished());
    task.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_short_periods_are_raised_to_minimum() {
    let calls = Arc::new(AtomicUsize::new(0));
    let backend = Arc::new(counting_backend(Arc::clone(&calls)));

    let task = RefreshTask::spawn(backend, SnapshotStore::new(), Duration::from_millis(1));
    tokio::time::sleep(MIN_REFRESH_PERIOD * 3 + Duration::from_millis(500)).await;

    // 0s, 1s, 2s, 3s
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    task.shutdown().await;
}
