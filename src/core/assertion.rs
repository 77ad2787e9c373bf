//! Assertion hook for surfacing soft failures
//!
//! The classifier reports deprecated call shapes (trailing booleans) and
//! test doubles used outside of tests through an injected hook instead of
//! failing the log call. Without a hook these reports are dropped.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

pub trait AssertionHook: Send + Sync {
    /// Called with `condition == false` when something should be flagged
    fn assert(&self, condition: bool, message: &str);

    /// Whether the process is running under tests
    fn testing(&self) -> bool {
        false
    }
}

/// Hook that keeps every failed assertion message
///
/// # Example
///
/// ```
/// use chalk_log::core::{AssertionHook, RecordingAssertionHook};
///
/// let hook = RecordingAssertionHook::new();
/// hook.assert(true, "fine");
/// hook.assert(false, "flagged");
/// assert_eq!(hook.failures(), vec!["flagged".to_string()]);
/// ```
#[derive(Default)]
pub struct RecordingAssertionHook {
    failures: Mutex<Vec<String>>,
    testing: bool,
}

impl RecordingAssertionHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hook that reports the process as running under tests
    pub fn for_tests() -> Self {
        Self {
            failures: Mutex::new(Vec::new()),
            testing: true,
        }
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().clone()
    }

    pub fn clear(&self) {
        self.failures.lock().clear();
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl AssertionHook for RecordingAssertionHook {
    fn assert(&self, condition: bool, message: &str) {
        if !condition {
            self.failures.lock().push(message.to_string());
        }
    }

    fn testing(&self) -> bool {
        self.testing
    }
}

impl fmt::Debug for RecordingAssertionHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingAssertionHook")
            .field("failures", &self.failures.lock().len())
            .field("testing", &self.testing)
            .finish()
    }
}
