/// Add/edit user form and the request bodies built from it
use super::user::UserRecord;
use crate::error::{AdminError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Operator-entered fields for creating or editing a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }

    /// Pre-fill the form from an existing record (edit flow)
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role.clone(),
        }
    }

    /// Check that every field is filled in and the email looks like one
    ///
    /// # Errors
    /// Returns `AdminError::Validation` describing the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AdminError::validation("Name is required."));
        }
        validate_email(&self.email)?;
        if self.role.trim().is_empty() {
            return Err(AdminError::validation("Role is required."));
        }
        Ok(())
    }

    /// Build a creation request stamped with `now` for both timestamps
    ///
    /// # Errors
    /// Returns `AdminError::Validation` if the form is incomplete
    pub fn into_new_user(self, now: DateTime<Utc>) -> Result<NewUser> {
        self.validate()?;
        let stamp = client_timestamp(now);
        Ok(NewUser {
            name: self.name,
            email: self.email,
            role: self.role,
            created_at: stamp.clone(),
            updated_at: stamp,
        })
    }

    /// Build an update request for `existing`, refreshing `updatedAt`
    ///
    /// # Errors
    /// Returns `AdminError::Validation` if the form is incomplete
    pub fn into_update(self, existing: &UserRecord, now: DateTime<Utc>) -> Result<UserUpdate> {
        self.validate()?;
        Ok(UserUpdate {
            name: self.name,
            email: self.email,
            role: self.role,
            created_at: existing.created_at.clone(),
            updated_at: client_timestamp(now),
        })
    }
}

/// Body of `POST /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of `PUT /users/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: Option<String>,
    pub updated_at: String,
}

/// `2024-05-01T10:00:00.000Z`, the shape browsers produce for ISO strings
fn client_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ if email.is_empty() => Err(AdminError::validation("Email is required.")),
        _ => Err(AdminError::validation(format!(
            "'{email}' is not a valid email address."
        ))),
    }
}
