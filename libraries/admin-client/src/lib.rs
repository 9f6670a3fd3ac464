//! Admin Panel Client
//!
//! HTTP clients for the users backend and the identity provider.
//!
//! # Features
//!
//! - **Users**: list, create, update and delete over the REST collection
//! - **Authentication**: email/password sign-up and sign-in, local sign-out,
//!   identity change notifications
//! - **Refresh**: a shared snapshot of the collection, re-fetched on a timer
//!   that stops when its owner drops it
//!
//! # Example
//!
//! ```ignore
//! use admin_client::{AdminClient, ClientConfig, RefreshTask, SnapshotStore};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AdminClient::new(ClientConfig::new("http://localhost:3000"))?;
//!
//!     let store = SnapshotStore::new();
//!     let task = RefreshTask::spawn(Arc::new(client.users()), store.clone(), Duration::from_secs(30));
//!
//!     let mut updates = store.subscribe();
//!     updates.changed().await?;
//!     if let Some(snapshot) = store.current() {
//!         println!("{} users", snapshot.users.len());
//!     }
//!
//!     task.shutdown().await;
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod refresh;
mod snapshot;
mod types;
mod users;

pub use client::AdminClient;
pub use error::{ClientError, Result};
pub use refresh::{RefreshTask, MIN_REFRESH_PERIOD};
pub use snapshot::{Snapshot, SnapshotStore};
pub use types::{ClientConfig, DEFAULT_IDENTITY_URL};

pub use auth::IdentityClient;
pub use users::UsersClient;
