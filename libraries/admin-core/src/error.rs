/// Core error types for the admin panel
use thiserror::Error;

/// Result type alias using `AdminError`
pub type Result<T> = std::result::Result<T, AdminError>;

/// Core error type for the admin panel
#[derive(Error, Debug)]
pub enum AdminError {
    /// Fetch rejected or backend answered with a non-success status
    #[error("Network error: {0}")]
    Network(String),

    /// Input rejected before submission
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A record carried data that could not be interpreted
    #[error("Data error: {0}")]
    Data(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Authentication provider rejected the request
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl AdminError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Whether the failure came from talking to a collaborator
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Whether the failure should be shown inline before submitting
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = AdminError::not_found("User", "42");
        assert_eq!(err.to_string(), "User not found: 42");
    }

    #[test]
    fn classification_helpers() {
        assert!(AdminError::network("refused").is_network());
        assert!(!AdminError::network("refused").is_validation());
        assert!(AdminError::validation("Passwords do not match.").is_validation());
        assert!(!AdminError::data("bad timestamp").is_network());
    }
}
