//! Main admin panel client.

use crate::auth::IdentityClient;
use crate::error::{ClientError, Result};
use crate::types::ClientConfig;
use crate::users::UsersClient;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Entry point for talking to the users backend and the identity provider.
///
/// One HTTP connection pool is shared by every sub-client.
///
/// # Example
///
/// ```ignore
/// use admin_client::{AdminClient, ClientConfig};
///
/// let config = ClientConfig::new("http://localhost:3000")
///     .with_identity(DEFAULT_IDENTITY_URL, Some(api_key));
/// let client = AdminClient::new(config)?;
///
/// client.identity().sign_in("ops@example.com", "secret").await?;
/// let users = client.users().list().await?;
/// println!("{} users", users.len());
/// ```
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    backend_url: Url,
    identity: IdentityClient,
}

impl AdminClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let backend = normalize_url(&config.backend_url)?;
        let backend_url = Url::parse(&backend)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.backend_url, e)))?;
        let identity_url = normalize_url(&config.identity_url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("AdminPanel/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        debug!(backend = %backend_url, identity = %identity_url, "Created admin client");

        let identity = IdentityClient::new(http.clone(), identity_url, config.api_key);

        Ok(Self {
            http,
            backend_url,
            identity,
        })
    }

    /// Base URL of the users backend.
    pub fn backend_url(&self) -> &str {
        self.backend_url.as_str().trim_end_matches('/')
    }

    /// Users collection client.
    ///
    /// Every request carries the session's token at the time it is sent, if
    /// one is signed in, as a bearer credential.
    pub fn users(&self) -> UsersClient {
        UsersClient::new(
            self.http.clone(),
            self.backend_url.clone(),
            Some(self.identity.subscribe()),
        )
    }

    /// Identity provider client.
    pub fn identity(&self) -> &IdentityClient {
        &self.identity
    }
}

// Empty and non-http(s) URLs are rejected; a trailing slash is dropped
fn normalize_url(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = raw.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(url)
}
