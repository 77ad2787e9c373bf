//! Output formats for composed events
//!
//! Provides two renderings of the same [`LogEvent`]:
//! - Structured: one JSON object per event
//! - TaggedText: human-readable lines prefixed with pid/action id/time tags

use super::config::LayoutConfig;
use super::error::LayoutError;
use super::error_value::ErrorValue;
use super::log_entry::LogEvent;
use super::render::{display, display_text};
use super::timestamp::format_event_time;
use super::value::FieldMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Frame shown for errors that carry no backtrace
pub const NO_BACKTRACE: &str = "(no backtrace)";

/// Output format for log events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// JSON for machine processing
    ///
    /// Example: `{"time":"2025-01-08 10:30:45.123456","level":"info","message":"Request processed","pid":9973}`
    #[serde(alias = "json")]
    Structured,

    /// Human-readable tagged text (default)
    ///
    /// Example: `[9973|req-1] Request processed: status=200`
    #[default]
    #[serde(alias = "pp")]
    TaggedText,
}

impl OutputFormat {
    /// Render an event. Errors are faults to be handled by the caller's
    /// fault tiers, never configuration problems.
    pub fn format(&self, event: &LogEvent, config: &LayoutConfig) -> Result<String, ErrorValue> {
        match self {
            OutputFormat::Structured => self.format_structured(event),
            OutputFormat::TaggedText => self.format_tagged(event, config),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Structured => "structured",
            OutputFormat::TaggedText => "tagged-text",
        }
    }

    /// Format as a single JSON line
    fn format_structured(&self, event: &LogEvent) -> Result<String, ErrorValue> {
        let mut json = serde_json::to_string(event).map_err(LayoutError::from)?;
        json.push('\n');
        Ok(json)
    }

    /// Format as tagged text
    fn format_tagged(&self, event: &LogEvent, config: &LayoutConfig) -> Result<String, ErrorValue> {
        let body = build_body(
            event.message.as_deref(),
            event.error.as_ref(),
            event.info.as_ref(),
        )?;
        let prefix = line_prefix(config, &event.time, event.pid, event.action_id.as_deref());
        Ok(finish_lines(&body, &prefix, config))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "structured" => Ok(OutputFormat::Structured),
            "pp" | "tagged-text" => Ok(OutputFormat::TaggedText),
            _ => Err(LayoutError::config(
                "output_format",
                format!("'{}' is not a valid setting of 'json' or 'pp'", s),
            )),
        }
    }
}

/// Message, info pairs and error description, ending in a newline
pub(crate) fn build_body(
    message: Option<&str>,
    error: Option<&ErrorValue>,
    info: Option<&FieldMap>,
) -> Result<String, ErrorValue> {
    let mut body = String::new();

    if let Some(message) = message {
        body.push_str(message);
        if error.is_some() || info.is_some() {
            body.push(':');
        }
    }

    if let Some(info) = info {
        let pairs: Vec<String> = info
            .iter()
            .map(|(key, value)| display(key, value, true))
            .collect();
        if message.is_some() {
            body.push(' ');
        }
        body.push_str(&pairs.join(" "));
    }

    if let Some(error) = error {
        if message.is_some() || info.is_some() {
            body.push(' ');
        }
        body.push_str(&describe_error(error)?);
    }

    body.push('\n');
    Ok(body)
}

/// `error_class=<class> error=<text>` followed by indented frames
pub(crate) fn describe_error(error: &ErrorValue) -> Result<String, ErrorValue> {
    let class_name = error.class_name()?;
    let message = error.message()?;
    let frames = error
        .backtrace()
        .filter(|frames| !frames.is_empty())
        .unwrap_or_else(|| vec![NO_BACKTRACE.to_string()]);

    Ok(format!(
        "{} {}\n{}",
        display_text("error_class", &class_name),
        display_text("error", &message),
        format_backtrace(&frames)
    ))
}

fn format_backtrace(frames: &[String]) -> String {
    frames
        .iter()
        .map(|frame| format!("  {}", frame))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `[time] [pid|action_id] `, with each part optional
pub(crate) fn line_prefix(
    config: &LayoutConfig,
    time: &DateTime<Utc>,
    pid: u32,
    action_id: Option<&str>,
) -> String {
    let mut tags = Vec::with_capacity(2);
    if !config.tag_without_pid {
        tags.push(pid.to_string());
    }
    if let Some(action_id) = action_id {
        tags.push(action_id.to_string());
    }

    let mut prefix = if tags.is_empty() {
        String::new()
    } else {
        format!("[{}] ", tags.join("|"))
    };
    if config.tag_with_timestamp {
        prefix = format!("[{}] {}", format_event_time(time), prefix);
    }
    prefix
}

/// Apply the prefix to every line, or return the bare body when tagging is
/// disabled. The result always ends in exactly one newline.
pub(crate) fn finish_lines(body: &str, prefix: &str, config: &LayoutConfig) -> String {
    let trimmed = body.trim_end_matches('\n');
    if config.tagging_disabled {
        let mut out = String::with_capacity(trimmed.len() + 1);
        out.push_str(trimmed);
        out.push('\n');
        return out;
    }

    let mut out = String::with_capacity(trimmed.len() + prefix.len() + 1);
    for line in trimmed.split('\n') {
        out.push_str(prefix);
        out.push_str(line);
        out.push('\n');
    }
    out
}
