//! Layout: turns a log call's arguments into a finished line
//!
//! The pipeline is classify → compose → format, wrapped in the fault tiers.
//! Only a configuration error (no output format) is returned as `Err`; every
//! other failure becomes degraded but valid output.

use super::ambient::Ambient;
use super::assertion::AssertionHook;
use super::classify::classify;
use super::config::LayoutConfig;
use super::error::{LayoutError, Result};
use super::error_value::ErrorValue;
use super::fault::{run_tiers, Formatted};
use super::log_entry::LogEvent;
use super::log_level::LogLevel;
use super::output_format::{line_prefix, OutputFormat};
use super::value::LogValue;
use std::fmt;
use std::sync::Arc;

/// Formats log calls according to a [`LayoutConfig`]
///
/// A `Layout` holds only read-only state and can be shared between threads.
///
/// # Example
///
/// ```
/// use chalk_log::core::{Ambient, Layout, LayoutConfig, LogLevel};
/// use chalk_log::{fields, log_args};
/// use chrono::Utc;
///
/// let layout = Layout::new(LayoutConfig::default());
/// let ambient = Ambient::new(LogLevel::Info, Utc::now(), 9973);
///
/// let line = layout
///     .format(&log_args!["A Message", fields! { "key1" => "ValueOne" }], &ambient)
///     .unwrap();
/// assert_eq!(line, "[9973] A Message: key1=ValueOne\n");
/// ```
#[derive(Clone)]
pub struct Layout {
    config: Arc<LayoutConfig>,
    assertion_hook: Option<Arc<dyn AssertionHook>>,
}

impl Layout {
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self::from_shared(Arc::new(config))
    }

    #[must_use]
    pub fn from_shared(config: Arc<LayoutConfig>) -> Self {
        Self {
            config,
            assertion_hook: None,
        }
    }

    /// Report deprecated arguments and misplaced test doubles to `hook`
    #[must_use]
    pub fn with_assertion_hook(mut self, hook: Arc<dyn AssertionHook>) -> Self {
        self.assertion_hook = Some(hook);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Format one log call.
    ///
    /// The result always ends in exactly one newline.
    pub fn format(&self, args: &[LogValue], ambient: &Ambient) -> Result<String> {
        self.format_with_tier(args, ambient).map(|formatted| formatted.output)
    }

    /// Format one log call, capturing time, pid and action id now
    pub fn format_now(&self, level: LogLevel, args: &[LogValue]) -> Result<String> {
        self.format(args, &Ambient::capture(level))
    }

    /// Like [`format`](Self::format), also reporting the fault tier reached
    pub fn format_with_tier(&self, args: &[LogValue], ambient: &Ambient) -> Result<Formatted> {
        let output_format = self.output_format()?;
        Ok(self.contain_faults(ambient, || self.do_format(output_format, args, ambient)))
    }

    /// Run an arbitrary formatting step inside the fault tiers.
    ///
    /// Single-fault output is tagged with the pid and ambient action id.
    pub fn contain_faults<F>(&self, ambient: &Ambient, pipeline: F) -> Formatted
    where
        F: FnOnce() -> std::result::Result<String, ErrorValue>,
    {
        let prefix = line_prefix(
            &self.config,
            &ambient.time,
            ambient.pid,
            ambient.action_id.as_deref(),
        );
        run_tiers(pipeline, &prefix, &self.config)
    }

    fn output_format(&self) -> Result<OutputFormat> {
        self.config.output_format.ok_or_else(|| {
            LayoutError::config(
                "output_format",
                "was not set to a valid setting of 'json' or 'pp'",
            )
        })
    }

    fn do_format(
        &self,
        output_format: OutputFormat,
        args: &[LogValue],
        ambient: &Ambient,
    ) -> std::result::Result<String, ErrorValue> {
        let classified = classify(args, self.assertion_hook.as_deref())?;
        let event = LogEvent::compose(classified, ambient);
        output_format.format(&event, &self.config)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("config", &self.config)
            .field("assertion_hook", &self.assertion_hook.is_some())
            .finish()
    }
}
