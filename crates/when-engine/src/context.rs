//! The reference frame every resolution call is evaluated against.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::error::{Result, WhenError};

/// The "now" anchor and the civil timezone used to interpret a phrase.
///
/// Capture one context per user-facing operation and reuse it: a form that
/// pre-fills a date and later validates the submitted value must see the same
/// `now`, or "tomorrow" may drift across midnight between the two calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceContext {
    now: DateTime<Utc>,
    timezone: Tz,
}

impl ReferenceContext {
    pub fn new(now: DateTime<Utc>, timezone: Tz) -> Self {
        Self { now, timezone }
    }

    /// Build a context from an IANA zone name such as `"America/Los_Angeles"`.
    ///
    /// # Errors
    ///
    /// Returns [`WhenError::InvalidTimezone`] if the name is not a known zone.
    pub fn from_zone_name(now: DateTime<Utc>, timezone: &str) -> Result<Self> {
        Ok(Self::new(now, parse_timezone(timezone)?))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// `now` expressed in the context's timezone.
    pub fn local_now(&self) -> DateTime<Tz> {
        self.now.with_timezone(&self.timezone)
    }

    /// `now` with seconds and sub-seconds dropped. Forward bias compares
    /// against this, so a phrase naming the current minute is not in the past.
    pub fn minute_floor(&self) -> DateTime<Utc> {
        truncate_to_minute(self.now)
    }
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| WhenError::InvalidTimezone(format!("'{}'", s)))
}

/// Parse an RFC 3339 datetime string into `DateTime<Utc>`.
pub fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| WhenError::InvalidDatetime(format!("'{}': {}", s, e)))
}

pub(crate) fn truncate_to_minute(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.duration_trunc(TimeDelta::minutes(1)).unwrap_or(dt)
}
