//! Types for the admin panel client configuration and wire formats.

use admin_core::AuthIdentity;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default hosted identity endpoint
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";

/// Configuration for connecting to the backend and the identity provider.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the users backend (e.g., "http://localhost:3000")
    pub backend_url: String,
    /// Base URL of the identity provider
    pub identity_url: String,
    /// Identity provider API key
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config for a backend, using the default identity endpoint.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Point the identity client at a provider.
    #[must_use]
    pub fn with_identity(mut self, identity_url: impl Into<String>, api_key: Option<String>) -> Self {
        self.identity_url = identity_url.into();
        self.api_key = api_key;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Identity Provider Types
// =============================================================================

/// Request body for the sign-up and sign-in endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PasswordAuthRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

/// Response from a successful sign-up or sign-in.
///
/// The provider also sends `refreshToken` and `expiresIn`; a session ends
/// with a fresh sign-in rather than a token renewal, so both are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PasswordAuthResponse {
    pub local_id: String,
    pub email: String,
    pub id_token: String,
}

impl From<PasswordAuthResponse> for AuthIdentity {
    fn from(response: PasswordAuthResponse) -> Self {
        AuthIdentity {
            user_id: response.local_id,
            email: response.email,
            id_token: response.id_token,
        }
    }
}

/// Error envelope returned by the identity provider.
#[derive(Debug, Deserialize)]
pub(crate) struct ProviderErrorBody {
    pub error: ProviderError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProviderError {
    pub message: String,
}
