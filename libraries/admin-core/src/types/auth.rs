/// Authentication domain types
use super::form::validate_email;
use crate::error::{AdminError, Result};
use serde::{Deserialize, Serialize};

/// The signed-in operator as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    /// Provider-side account id
    pub user_id: String,

    /// Account email
    pub email: String,

    /// Bearer token for backend requests
    pub id_token: String,
}

/// Sign-up form
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Check the form before anything is sent to the provider
    ///
    /// # Errors
    /// Returns `AdminError::Validation` on mismatched passwords, an empty
    /// password, or a malformed email
    pub fn validate(&self) -> Result<()> {
        if self.password != self.confirm_password {
            return Err(AdminError::validation("Passwords do not match."));
        }
        if self.password.is_empty() {
            return Err(AdminError::validation("Password is required."));
        }
        validate_email(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_passwords_validate() {
        let reg = Registration::new("Ann", "ann@example.com", "s3cret!", "s3cret!");
        assert!(reg.validate().is_ok());
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let reg = Registration::new("Ann", "ann@example.com", "s3cret!", "s3cret?");
        let err = reg.validate().unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation failed: Passwords do not match.");
    }

    #[test]
    fn mismatch_is_reported_before_email_problems() {
        let reg = Registration::new("Ann", "not-an-email", "a", "b");
        assert!(reg
            .validate()
            .unwrap_err()
            .to_string()
            .contains("Passwords do not match"));
    }

    #[test]
    fn empty_password_is_rejected() {
        let reg = Registration::new("Ann", "ann@example.com", "", "");
        assert!(reg.validate().is_err());
    }
}
