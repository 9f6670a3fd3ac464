/// Command handlers
///
/// Each handler writes its human-readable result to `out`; logging goes to
/// stderr through tracing.
pub mod auth;
pub mod metrics;
pub mod users;

use crate::config::AdminConfig;
use crate::error::Result;
use admin_client::AdminClient;
use tracing::info;

/// Build a client and, when credentials are configured, sign in so backend
/// requests carry the session token.
pub async fn connect(config: &AdminConfig) -> Result<AdminClient> {
    let client = AdminClient::new(config.client_config())?;

    if let Some((email, password)) = config.credentials() {
        let identity = client.identity().sign_in(email, password).await?;
        info!(email = %identity.email, "Using signed-in session for backend requests");
    }

    Ok(client)
}
