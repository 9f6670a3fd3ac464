//! Error types for the admin panel clients.

use admin_core::AdminError;
use thiserror::Error;

/// Errors that can occur when talking to the users backend or the identity
/// provider.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Backend is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// User does not exist on the backend
    #[error("User not found: {0}")]
    NotFound(String),

    /// Authentication required but no session available
    #[error("Authentication required")]
    AuthRequired,

    /// Identity provider rejected the credentials or the request
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Identity provider API key missing from configuration
    #[error("Identity provider API key is not configured")]
    MissingApiKey,

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Input rejected before sending
    #[error(transparent)]
    Validation(AdminError),
}

impl ClientError {
    /// Classify a transport failure
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    }
}

impl From<ClientError> for AdminError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(_)
            | ClientError::ServerError { .. }
            | ClientError::ServerUnreachable(_) => AdminError::network(err.to_string()),
            ClientError::NotFound(id) => AdminError::not_found("User", id),
            ClientError::AuthFailed(msg) => AdminError::auth(msg),
            ClientError::AuthRequired | ClientError::MissingApiKey => {
                AdminError::auth(err.to_string())
            }
            ClientError::ParseError(msg) => AdminError::data(msg),
            ClientError::InvalidUrl(msg) => AdminError::Other(format!("Invalid URL: {msg}")),
            ClientError::Validation(inner) => inner,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
