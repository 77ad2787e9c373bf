//! Layout configuration
//!
//! Holds the read-only options shared by every format call: which output
//! format to produce and how tagged-text lines are prefixed.

use super::output_format::OutputFormat;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for a [`Layout`](super::layout::Layout)
///
/// # Examples
///
/// ```
/// use chalk_log::core::{LayoutConfig, OutputFormat};
///
/// let config = LayoutConfig::new()
///     .with_output_format(OutputFormat::TaggedText)
///     .with_tag_with_timestamp(true)
///     .with_tag_without_pid(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Output format; `None` is a configuration error at format time
    pub output_format: Option<OutputFormat>,
    /// Skip line prefixes entirely in tagged-text output
    pub tagging_disabled: bool,
    /// Leave the pid out of the line prefix
    pub tag_without_pid: bool,
    /// Prepend `[<time>] ` to every tagged line
    pub tag_with_timestamp: bool,
    /// Write a diagnostic line to stderr when a fault tier is entered
    pub fault_reports: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            output_format: Some(OutputFormat::default()),
            tagging_disabled: false,
            tag_without_pid: false,
            tag_with_timestamp: false,
            fault_reports: true,
        }
    }
}

impl LayoutConfig {
    /// Create a new layout configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Clear the output format
    #[must_use]
    pub fn without_output_format(mut self) -> Self {
        self.output_format = None;
        self
    }

    #[must_use]
    pub fn with_tagging_disabled(mut self, disabled: bool) -> Self {
        self.tagging_disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_tag_without_pid(mut self, without_pid: bool) -> Self {
        self.tag_without_pid = without_pid;
        self
    }

    #[must_use]
    pub fn with_tag_with_timestamp(mut self, with_timestamp: bool) -> Self {
        self.tag_with_timestamp = with_timestamp;
        self
    }

    #[must_use]
    pub fn with_fault_reports(mut self, enabled: bool) -> Self {
        self.fault_reports = enabled;
        self
    }

    /// Wrap this config in an Arc for sharing across threads
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
