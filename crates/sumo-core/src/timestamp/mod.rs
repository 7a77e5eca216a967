use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::error::CoreError;

/// Parse `raw` as an RFC 3339 date-time, falling back to integer epoch seconds (UTC).
pub fn resolve_timestamp(raw: &str) -> Result<OffsetDateTime, CoreError> {
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(ts);
    }

    raw.parse::<i64>()
        .ok()
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .ok_or_else(|| CoreError::InvalidTimestamp {
            value: raw.to_string(),
        })
}

/// Absolute query window of one task.
///
/// `end` is not required to follow `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl ResolvedWindow {
    pub fn resolve(start: &str, end: &str) -> Result<Self, CoreError> {
        Ok(Self {
            start: resolve_timestamp(start)?,
            end: resolve_timestamp(end)?,
        })
    }

    /// `ceil(end - start)` in whole seconds; zero or negative when the window is inverted.
    pub fn duration_secs(&self) -> i64 {
        (self.end - self.start).as_seconds_f64().ceil() as i64
    }

    pub fn start_millis(&self) -> i64 {
        epoch_millis(self.start)
    }

    pub fn end_millis(&self) -> i64 {
        epoch_millis(self.end)
    }
}

fn epoch_millis(ts: OffsetDateTime) -> i64 {
    ts.unix_timestamp_nanos().div_euclid(1_000_000) as i64
}
