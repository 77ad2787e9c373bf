//! Error-like values carried by log calls
//!
//! Anything that can describe itself as an error (a class name, a message and
//! an optional list of frames) implements [`ErrorLike`]. The classifier only
//! ever asks for this capability, never for a concrete type, so application
//! errors, captured failures and test doubles are treated the same way.
//!
//! Producing the class name or message is fallible: a value may turn out to be
//! hostile to introspection. The failure is itself reported as an
//! [`ErrorValue`] so the fault tiers can try to describe it in turn.

use super::error::LayoutError;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

/// Capability of being logged as an error.
pub trait ErrorLike: fmt::Debug + Send + Sync {
    /// Type name shown as `error_class`
    fn class_name(&self) -> Result<String, ErrorValue>;

    /// Human-readable error text shown as `error`
    fn message(&self) -> Result<String, ErrorValue>;

    /// Captured frames, outermost first. `None` when nothing was captured.
    fn backtrace(&self) -> Option<Vec<String>> {
        None
    }

    /// Test doubles standing in for errors answer `true`.
    fn is_test_double(&self) -> bool {
        false
    }
}

/// Shared handle to an error-like value.
#[derive(Clone)]
pub struct ErrorValue(Arc<dyn ErrorLike>);

impl ErrorValue {
    pub fn new<E: ErrorLike + 'static>(error: E) -> Self {
        ErrorValue(Arc::new(error))
    }

    /// Capture any standard error, using its type name as the class name.
    pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        Self::new(CapturedError::from_error(error))
    }

    pub fn class_name(&self) -> Result<String, ErrorValue> {
        self.0.class_name()
    }

    pub fn message(&self) -> Result<String, ErrorValue> {
        self.0.message()
    }

    pub fn backtrace(&self) -> Option<Vec<String>> {
        self.0.backtrace()
    }

    pub fn is_test_double(&self) -> bool {
        self.0.is_test_double()
    }

    pub fn inner(&self) -> &Arc<dyn ErrorLike> {
        &self.0
    }
}

impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// Identity comparison: two handles are equal when they share the same error.
impl PartialEq for ErrorValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<LayoutError> for ErrorValue {
    fn from(err: LayoutError) -> Self {
        ErrorValue::new(
            CapturedError::new(err.kind(), err.to_string()).with_captured_backtrace(),
        )
    }
}

/// Plain structured error: class name, message and frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedError {
    pub class_name: String,
    pub message: String,
    pub backtrace: Option<Vec<String>>,
}

impl CapturedError {
    pub fn new(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            message: message.into(),
            backtrace: None,
        }
    }

    pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        Self::new(short_type_name::<E>(), error.to_string())
    }

    pub fn with_backtrace<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backtrace = Some(frames.into_iter().map(Into::into).collect());
        self
    }

    /// Attach the current thread's backtrace if backtraces are enabled
    /// (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`).
    pub fn with_captured_backtrace(mut self) -> Self {
        self.backtrace = capture_frames();
        self
    }
}

impl ErrorLike for CapturedError {
    fn class_name(&self) -> Result<String, ErrorValue> {
        Ok(self.class_name.clone())
    }

    fn message(&self) -> Result<String, ErrorValue> {
        Ok(self.message.clone())
    }

    fn backtrace(&self) -> Option<Vec<String>> {
        self.backtrace.clone()
    }
}

impl fmt::Display for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class_name, self.message)
    }
}

fn capture_frames() -> Option<Vec<String>> {
    let backtrace = Backtrace::capture();
    if backtrace.status() != BacktraceStatus::Captured {
        return None;
    }
    let frames: Vec<String> = backtrace
        .to_string()
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    if frames.is_empty() {
        None
    } else {
        Some(frames)
    }
}

/// `std::io::Error` -> `Error`, `my_crate::Wrapper<u8>` -> `Wrapper`
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
