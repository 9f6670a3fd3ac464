/// User domain type
use super::ids::UserId;
use super::timestamp::parse_timestamp;
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A user as held by the backend
///
/// Timestamps are kept exactly as received so that a record with a missing
/// or malformed `createdAt` still loads; consumers parse on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Backend-assigned identifier
    pub id: UserId,

    /// Display name
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,

    /// Contact email
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,

    /// Free-form role label
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: String,

    /// Creation timestamp (ISO 8601 string)
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601 string)
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<String>,
}

impl UserRecord {
    /// Create a record with the given fields and no timestamps
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: role.into(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the creation timestamp from a UTC instant
    #[must_use]
    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at.to_rfc3339());
        self
    }

    /// Parse `createdAt`
    ///
    /// # Errors
    /// Returns `AdminError::Data` when the field is missing or unparsable
    pub fn created_at_utc(&self) -> Result<DateTime<Utc>> {
        match &self.created_at {
            Some(raw) => parse_timestamp(raw),
            None => Err(crate::AdminError::data("missing createdAt")),
        }
    }
}

/// Map `null` to an empty string and other scalars to their JSON text
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Keep strings, map `null` to `None`, and read integers as epoch
/// milliseconds. Anything else is kept as its JSON text so it surfaces later
/// as an unparsable timestamp.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(
            n.as_i64()
                .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
                .map_or_else(
                    || n.to_string(),
                    |at| at.to_rfc3339_opts(SecondsFormat::Millis, true),
                ),
        ),
        Some(other) => Some(other.to_string()),
    })
}
