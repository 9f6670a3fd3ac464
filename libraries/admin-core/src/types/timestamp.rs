//! Timestamp parsing for backend-supplied ISO 8601 strings.

use crate::error::{AdminError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse an ISO 8601 timestamp as written by the backend or the client clock.
///
/// Accepts, in order:
/// - RFC 3339 with offset or `Z` (`2024-05-01T10:00:00.000Z`)
/// - a date-time without offset, taken as UTC (`2024-05-01T10:00:00`)
/// - a bare date, taken as midnight UTC (`2024-05-01`)
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(AdminError::data(format!("unparsable timestamp: {raw:?}")))
}
