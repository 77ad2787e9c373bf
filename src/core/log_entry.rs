//! Composed log event

use super::ambient::Ambient;
use super::classify::ClassifiedArgs;
use super::error_value::ErrorValue;
use super::log_level::LogLevel;
use super::render::render_value;
use super::timestamp::serialize_event_time;
use super::value::{FieldMap, LogValue};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// One log call's fields, ready for an output format
///
/// Field order here is the key order of structured output. Absent fields are
/// skipped rather than written as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    #[serde(serialize_with = "serialize_event_time")]
    pub time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_level")]
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<FieldMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<FieldMap>,
    pub pid: u32,
}

impl LogEvent {
    /// Merge classified arguments with ambient context.
    ///
    /// `meta.id` wins over the ambient action id.
    pub fn compose(classified: ClassifiedArgs, ambient: &Ambient) -> Self {
        let action_id = classified
            .meta
            .as_ref()
            .and_then(|meta| meta.get("id"))
            .map(action_id_text)
            .or_else(|| ambient.action_id.clone());

        Self {
            time: ambient.time,
            level: ambient.level,
            action_id,
            message: classified.message,
            meta: classified.meta,
            error: classified.error,
            info: classified.info,
            pid: ambient.pid,
        }
    }
}

fn action_id_text(id: &LogValue) -> String {
    match id {
        LogValue::Text(s) => s.clone(),
        other => render_value(other).text,
    }
}

fn serialize_level<S: Serializer>(level: &LogLevel, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(level.name())
}
