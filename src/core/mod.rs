//! Core layout types and traits

pub mod ambient;
pub mod assertion;
pub mod classify;
pub mod config;
pub mod error;
pub mod error_value;
pub mod fault;
pub mod layout;
pub mod log_entry;
pub mod log_level;
pub mod output_format;
pub mod render;
pub mod timestamp;
pub mod value;

pub use ambient::{current_action_id, with_action_id, ActionScope, Ambient};
pub use assertion::{AssertionHook, RecordingAssertionHook};
pub use classify::{classify, ArgumentRole, ClassifiedArgs, Slot};
pub use config::LayoutConfig;
pub use error::{LayoutError, Result};
pub use error_value::{CapturedError, ErrorLike, ErrorValue};
pub use fault::{
    FaultTier, Formatted, DOUBLE_FAULT_MARKER, SINGLE_FAULT_MARKER, TRIPLE_FAULT_MARKER,
};
pub use layout::Layout;
pub use log_entry::LogEvent;
pub use log_level::LogLevel;
pub use output_format::{OutputFormat, NO_BACKTRACE};
pub use render::{display, render_value, RenderedValue, JSON_FAILED_MARKER, RESERVED_KEYS};
pub use timestamp::{format_event_time, EVENT_TIME_FORMAT};
pub use value::{FieldMap, LogValue};
