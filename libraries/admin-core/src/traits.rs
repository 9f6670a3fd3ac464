/// Core traits for the admin panel
///
/// These are the seams to the two external collaborators: the REST backend
/// that owns the users collection and the identity provider that owns
/// operator accounts.
use crate::error::Result;
use crate::types::{AuthIdentity, NewUser, UserId, UserRecord, UserUpdate};
use async_trait::async_trait;
use tokio::sync::watch;

/// Receiver side of the auth-state subscription
///
/// Holds the current identity (or `None` when signed out) and is notified
/// on every change.
pub type AuthSubscription = watch::Receiver<Option<AuthIdentity>>;

/// Users collection backend
///
/// Implementations perform exactly one request per call. Callers refetch
/// the full list after every mutation instead of patching local state.
#[async_trait]
pub trait UserBackend: Send + Sync {
    /// Fetch the whole collection
    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    /// Create a user
    async fn create_user(&self, user: &NewUser) -> Result<()>;

    /// Replace a user's fields
    async fn update_user(&self, id: &UserId, update: &UserUpdate) -> Result<()>;

    /// Remove a user
    async fn delete_user(&self, id: &UserId) -> Result<()>;
}

/// Identity provider
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create an account; the provider signs the new account in
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthIdentity>;

    /// Sign in with email and password
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity>;

    /// Drop the current session
    async fn sign_out(&self) -> Result<()>;

    /// Current identity, if any
    fn current(&self) -> Option<AuthIdentity>;

    /// Subscribe to identity changes
    fn subscribe(&self) -> AuthSubscription;
}
