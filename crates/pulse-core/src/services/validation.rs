//! Input checks shared by the post operations.
//!
//! Everything here runs before the store is touched.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::Topic;
use crate::error::DomainError;

/// Reject missing or whitespace-only text.
pub fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn parse_topic(raw: &str) -> Result<Topic, DomainError> {
    raw.parse::<Topic>()
        .map_err(|e| DomainError::Validation(e.to_string()))
}

/// Parse a non-empty topic list into a set, collapsing duplicates.
pub fn parse_topics<S: AsRef<str>>(raw: &[S]) -> Result<BTreeSet<Topic>, DomainError> {
    if raw.is_empty() {
        return Err(DomainError::Validation(
            "at least one topic is required".to_string(),
        ));
    }

    raw.iter().map(|t| parse_topic(t.as_ref())).collect()
}

/// Parse an ISO-8601 timestamp.
///
/// RFC 3339 strings keep their offset; a bare date-time or a bare date is
/// taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
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

    Err(DomainError::Validation(format!(
        "expiresAt '{raw}' is not a valid ISO-8601 timestamp"
    )))
}
