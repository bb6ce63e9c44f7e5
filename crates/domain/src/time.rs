//! Time and timestamp helpers.
//!
//! Timestamps are held as `DateTime<Utc>` and encoded on the wire as
//! milliseconds since the Unix epoch, so they are produced at millisecond
//! precision.

use chrono::{DateTime, SubsecRound, Utc};

/// UTC timestamp used for measurement and status-change times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to whole milliseconds.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(3)
}

/// Return the current time, never earlier than `previous`.
///
/// Keeps per-device timestamps non-decreasing if the wall clock steps back.
#[must_use]
pub fn advance(previous: Option<Timestamp>) -> Timestamp {
    let current = now();
    previous.map_or(current, |prev| prev.max(current))
}
