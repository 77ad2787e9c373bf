//! Timestamp formatting for event times
//!
//! Events carry microsecond precision: `1979-04-09 00:00:00.000000`.

use chrono::{DateTime, Utc};
use serde::Serializer;

/// strftime pattern for the `time` field and the timestamp tag
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Format an event time as `YYYY-MM-DD HH:MM:SS.ffffff`
#[must_use]
pub fn format_event_time(datetime: &DateTime<Utc>) -> String {
    datetime.format(EVENT_TIME_FORMAT).to_string()
}

/// serde helper writing a time in [`EVENT_TIME_FORMAT`]
pub(crate) fn serialize_event_time<S: Serializer>(
    datetime: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&datetime.format(EVENT_TIME_FORMAT))
}
