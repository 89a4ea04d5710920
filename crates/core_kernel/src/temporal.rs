//! Temporal row versions
//!
//! Temporal tables keep every prior version of a row together with the
//! period during which that version was the current one:
//! - `period_start`: when the version became current (inclusive)
//! - `period_end`: when it was superseded (exclusive), `None` while current

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Unrecognised point in time: {0}")]
    InvalidInstant(String),
}

/// The period during which a row version was current
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityPeriod {
    /// Start of the period (inclusive)
    pub start: DateTime<Utc>,
    /// End of the period (exclusive), None while the version is current
    pub end: Option<DateTime<Utc>>,
}

impl ValidityPeriod {
    /// Creates a new validity period
    ///
    /// Zero-length periods are allowed: a row updated twice inside one
    /// transaction produces a version that was never observable.
    pub fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<Self, TemporalError> {
        if let Some(end) = end {
            if start > end {
                return Err(TemporalError::InvalidPeriod {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// Returns true if the period contains the given instant
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && self.end.map_or(true, |e| instant < e)
    }
}

/// A value paired with the period it was current
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalVersion<T> {
    pub data: T,
    pub period: ValidityPeriod,
}

impl<T> TemporalVersion<T> {
    pub fn new(data: T, period: ValidityPeriod) -> Self {
        Self { data, period }
    }
}

/// Parses a point in time for as-of queries
///
/// Accepts RFC 3339 (`2024-06-15T12:00:00Z`), a naive date-time interpreted
/// as UTC (`2024-06-15T12:00:00`, optional fraction, `T` or space separated)
/// or a bare date meaning midnight UTC (`2024-06-15`).
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>, TemporalError> {
    let input = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TemporalError::InvalidInstant(input.to_string()))
}
