//! Ambient context supplied to each format call
//!
//! This module provides:
//! - `Ambient`: time, level, pid and action id for one log call
//! - `ActionScope`: RAII guard setting the current thread's action id
//!
//! The formatter never reads global state itself. Callers either build an
//! `Ambient` explicitly or use [`Ambient::capture`], which reads the clock,
//! the process id and the innermost [`ActionScope`] exactly once.

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    static ACTION_IDS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Context the formatter merges into every event
#[derive(Debug, Clone, PartialEq)]
pub struct Ambient {
    pub time: DateTime<Utc>,
    pub level: LogLevel,
    pub pid: u32,
    pub action_id: Option<String>,
}

impl Ambient {
    /// Explicit context, useful for tests and replay
    pub fn new(level: LogLevel, time: DateTime<Utc>, pid: u32) -> Self {
        Self {
            time,
            level,
            pid,
            action_id: None,
        }
    }

    /// Capture the current time, process id and thread action id
    pub fn capture(level: LogLevel) -> Self {
        Self {
            time: Utc::now(),
            level,
            pid: std::process::id(),
            action_id: current_action_id(),
        }
    }

    pub fn with_action_id(mut self, action_id: impl Into<String>) -> Self {
        self.action_id = Some(action_id.into());
        self
    }

    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }
}

/// Innermost action id set on this thread, if any
pub fn current_action_id() -> Option<String> {
    ACTION_IDS.with(|ids| ids.borrow().last().cloned())
}

/// Run `f` with `action_id` as the current thread's action id
pub fn with_action_id<R>(action_id: impl Into<String>, f: impl FnOnce() -> R) -> R {
    let _scope = ActionScope::enter(action_id);
    f()
}

/// RAII guard for a scoped action id
///
/// Scopes nest; dropping a guard restores the previous action id.
///
/// # Example
///
/// ```
/// use chalk_log::core::{current_action_id, ActionScope};
///
/// {
///     let _outer = ActionScope::enter("request-1");
///     {
///         let _inner = ActionScope::enter("job-7");
///         assert_eq!(current_action_id().as_deref(), Some("job-7"));
///     }
///     assert_eq!(current_action_id().as_deref(), Some("request-1"));
/// }
/// assert_eq!(current_action_id(), None);
/// ```
///
/// A guard pops the stack of the thread that entered it, so it cannot be
/// sent to another thread:
///
/// ```compile_fail
/// use chalk_log::core::ActionScope;
///
/// let scope = ActionScope::enter("request-1");
/// std::thread::spawn(move || drop(scope));
/// ```
pub struct ActionScope {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl ActionScope {
    #[must_use]
    pub fn enter(action_id: impl Into<String>) -> Self {
        let action_id = action_id.into();
        let depth = ACTION_IDS.with(|ids| {
            let mut ids = ids.borrow_mut();
            ids.push(action_id);
            ids.len()
        });
        Self {
            depth,
            _not_send: PhantomData,
        }
    }
}

impl Drop for ActionScope {
    fn drop(&mut self) {
        ACTION_IDS.with(|ids| ids.borrow_mut().truncate(self.depth - 1));
    }
}
