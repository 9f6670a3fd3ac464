//! Email/password authentication against the identity provider.

use crate::error::{ClientError, Result};
use crate::types::{PasswordAuthRequest, PasswordAuthResponse, ProviderErrorBody};
use admin_core::{AuthIdentity, AuthProvider, AuthSubscription};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Identity provider client.
///
/// Holds the session for the process. Clones share the same session, so a
/// sign-out through one clone is seen by every subscriber.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    state: Arc<watch::Sender<Option<AuthIdentity>>>,
}

impl IdentityClient {
    pub(crate) fn new(http: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            http,
            base_url: base_url.into(),
            api_key,
            state: Arc::new(state),
        }
    }

    /// Create an account. The provider signs the new account in.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthIdentity> {
        let identity = self.password_auth("signUp", email, password).await?;
        info!(user_id = %identity.user_id, email = %identity.email, "Account created");
        self.state.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity> {
        let identity = self.password_auth("signInWithPassword", email, password).await?;
        info!(user_id = %identity.user_id, email = %identity.email, "Signed in");
        self.state.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    /// Drop the local session.
    ///
    /// The provider keeps no server-side session for password sign-in, so
    /// this never makes a request.
    pub fn sign_out(&self) {
        if self.state.send_replace(None).is_some() {
            info!("Signed out");
        }
    }

    /// The signed-in identity, if any.
    pub fn current(&self) -> Option<AuthIdentity> {
        self.state.borrow().clone()
    }

    /// Bearer token of the current session.
    pub fn id_token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|i| i.id_token.clone())
    }

    /// Whether a session is active.
    pub fn is_signed_in(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Receive every change of the signed-in identity.
    pub fn subscribe(&self) -> AuthSubscription {
        self.state.subscribe()
    }

    async fn password_auth(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthIdentity> {
        let key = self.api_key.as_deref().ok_or(ClientError::MissingApiKey)?;
        let url = format!("{}/v1/accounts:{}", self.base_url, action);
        debug!(url = %url, email = %email, "Calling identity provider");

        let request = PasswordAuthRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", key)])
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let body: PasswordAuthResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse identity response: {}", e))
            })?;
            Ok(body.into())
        } else if status.is_client_error() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            warn!(status = %status, error = %message, "Identity provider rejected request");
            Err(ClientError::AuthFailed(message))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl AuthProvider for IdentityClient {
    async fn sign_up(&self, email: &str, password: &str) -> admin_core::Result<AuthIdentity> {
        Ok(IdentityClient::sign_up(self, email, password).await?)
    }

    async fn sign_in(&self, email: &str, password: &str) -> admin_core::Result<AuthIdentity> {
        Ok(IdentityClient::sign_in(self, email, password).await?)
    }

    async fn sign_out(&self) -> admin_core::Result<()> {
        IdentityClient::sign_out(self);
        Ok(())
    }

    fn current(&self) -> Option<AuthIdentity> {
        IdentityClient::current(self)
    }

    fn subscribe(&self) -> AuthSubscription {
        IdentityClient::subscribe(self)
    }
}
