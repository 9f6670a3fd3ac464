//! Users collection operations against the REST backend.

use crate::error::{ClientError, Result};
use admin_core::{AuthSubscription, NewUser, UserBackend, UserId, UserRecord, UserUpdate};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Client for `/users` on the backend.
///
/// Cheap to clone; the underlying connection pool is shared. The bearer token
/// is read from the session on every request, so a long-lived client follows
/// sign-in, sign-out and re-authentication.
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: Client,
    base_url: Url,
    session: Option<AuthSubscription>,
}

impl UsersClient {
    pub(crate) fn new(http: Client, base_url: Url, session: Option<AuthSubscription>) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    fn url_for(&self, id: Option<&UserId>) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }

    fn collection_url(&self) -> Url {
        self.url_for(None)
    }

    fn item_url(&self, id: &UserId) -> Url {
        self.url_for(Some(id))
    }

    fn bearer(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        session.borrow().as_ref().map(|i| i.id_token.clone())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        self.authorize(request)
            .send()
            .await
            .map_err(ClientError::from_send)
    }

    /// Fetch the whole users collection.
    ///
    /// Entries that cannot be read as a user (no `id`, not an object) are
    /// logged and skipped; only a body that is not a JSON array fails.
    pub async fn list(&self) -> Result<Vec<UserRecord>> {
        let url = self.collection_url();
        debug!(url = %url, "Fetching users");

        let response = self.send(self.http.get(url.clone())).await?;
        let status = response.status();

        if status.is_success() {
            let entries: Vec<Value> = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse users response: {}", e))
            })?;

            let users = decode_users(entries);
            debug!(count = users.len(), "Fetched users");
            Ok(users)
        } else {
            Err(status_error(response).await)
        }
    }

    /// Create a user.
    pub async fn create(&self, user: &NewUser) -> Result<()> {
        let url = self.collection_url();
        debug!(url = %url, email = %user.email, "Creating user");

        let response = self.send(self.http.post(url.clone()).json(user)).await?;

        if response.status().is_success() {
            debug!(email = %user.email, "User created");
            Ok(())
        } else {
            Err(status_error(response).await)
        }
    }

    /// Replace a user's fields.
    pub async fn update(&self, id: &UserId, update: &UserUpdate) -> Result<()> {
        let url = self.item_url(id);
        debug!(url = %url, user_id = %id, "Updating user");

        let response = self.send(self.http.put(url.clone()).json(update)).await?;
        let status = response.status();

        if status.is_success() {
            debug!(user_id = %id, "User updated");
            Ok(())
        } else if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(id.to_string()))
        } else {
            Err(status_error(response).await)
        }
    }

    /// Delete a user.
    pub async fn delete(&self, id: &UserId) -> Result<()> {
        let url = self.item_url(id);
        debug!(url = %url, user_id = %id, "Deleting user");

        let response = self.send(self.http.delete(url.clone())).await?;
        let status = response.status();

        if status.is_success() {
            debug!(user_id = %id, "User deleted");
            Ok(())
        } else if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(id.to_string()))
        } else {
            Err(status_error(response).await)
        }
    }
}

#[async_trait]
impl UserBackend for UsersClient {
    async fn list_users(&self) -> admin_core::Result<Vec<UserRecord>> {
        Ok(self.list().await?)
    }

    async fn create_user(&self, user: &NewUser) -> admin_core::Result<()> {
        Ok(self.create(user).await?)
    }

    async fn update_user(&self, id: &UserId, update: &UserUpdate) -> admin_core::Result<()> {
        Ok(self.update(id, update).await?)
    }

    async fn delete_user(&self, id: &UserId) -> admin_core::Result<()> {
        Ok(self.delete(id).await?)
    }
}

fn decode_users(entries: Vec<Value>) -> Vec<UserRecord> {
    let total = entries.len();
    let users: Vec<UserRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(index, error = %e, "Skipping undecodable user record");
                None
            }
        })
        .collect();

    let skipped = total - users.len();
    if skipped > 0 {
        warn!(skipped, total, "Some user records were skipped");
    }
    users
}

async fn status_error(response: Response) -> ClientError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::AuthRequired,
        _ => ClientError::ServerError {
            status: status.as_u16(),
            message,
        },
    }
}
