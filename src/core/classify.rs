//! Positional argument classification
//!
//! Log calls accept any of these shapes:
//!
//! ```text
//! log.error("Something went wrong!")
//! log.info("Booting the server on:", {host})
//! log.error("Something went wrong", err)
//! log.error({id}, "Something went wrong", err, {info})
//! ```
//!
//! The argument list is scanned from the tail. Each [`ArgumentRole`] is tried
//! once, in order, and claims the last remaining argument if it has the
//! matching capability. Anything left over is an error.

use super::assertion::AssertionHook;
use super::error::{LayoutError, Result};
use super::error_value::ErrorValue;
use super::value::{inspect_all, FieldMap, LogValue};

/// Slots a trailing argument can fill, in tail-scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentRole {
    Info,
    Error,
    Message,
    Meta,
}

impl ArgumentRole {
    pub const SCAN_ORDER: [ArgumentRole; 4] = [
        ArgumentRole::Info,
        ArgumentRole::Error,
        ArgumentRole::Message,
        ArgumentRole::Meta,
    ];

    /// Extract this role's field from `value`, or `None` if the value lacks
    /// the capability
    pub fn take(&self, value: &LogValue) -> Option<Slot> {
        match (self, value) {
            (ArgumentRole::Info, LogValue::Map(map)) => Some(Slot::Info(map.clone())),
            (ArgumentRole::Meta, LogValue::Map(map)) => Some(Slot::Meta(map.clone())),
            (ArgumentRole::Error, LogValue::Error(err)) => Some(Slot::Error(err.clone())),
            (ArgumentRole::Message, LogValue::Text(text)) => Some(Slot::Message(text.clone())),
            _ => None,
        }
    }
}

/// A field claimed by an [`ArgumentRole`]
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Info(FieldMap),
    Error(ErrorValue),
    Message(String),
    Meta(FieldMap),
}

/// Fields recovered from a call site's arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedArgs {
    pub message: Option<String>,
    pub error: Option<ErrorValue>,
    pub info: Option<FieldMap>,
    pub meta: Option<FieldMap>,
}

impl ClassifiedArgs {
    pub fn is_empty(&self) -> bool {
        self.message.is_none()
            && self.error.is_none()
            && self.info.is_none()
            && self.meta.is_none()
    }

    fn fill(&mut self, slot: Slot) {
        match slot {
            Slot::Info(map) => self.info = Some(map),
            Slot::Meta(map) => self.meta = Some(map),
            Slot::Error(err) => self.error = Some(err),
            Slot::Message(text) => self.message = Some(text),
        }
    }
}

/// Classify a call site's arguments. The input slice is never modified.
pub fn classify(args: &[LogValue], hook: Option<&dyn AssertionHook>) -> Result<ClassifiedArgs> {
    let mut remaining = args;

    while let Some((last, rest)) = remaining.split_last() {
        if !last.is_ignorable() {
            break;
        }
        if matches!(last, LogValue::Bool(_)) {
            maybe_assert(
                hook,
                false,
                &format!(
                    "Ignoring deprecated arguments passed to logger: {}",
                    inspect_all(remaining)
                ),
            );
        }
        remaining = rest;
    }

    let mut classified = ClassifiedArgs::default();
    for role in ArgumentRole::SCAN_ORDER {
        let Some((last, rest)) = remaining.split_last() else {
            break;
        };
        let Some(slot) = role.take(last) else {
            continue;
        };
        if let Slot::Error(err) = &slot {
            if err.is_test_double() {
                let testing = hook.map(|h| h.testing()).unwrap_or(false);
                maybe_assert(hook, testing, "Passed a mock even though we're not in the tests");
            }
        }
        classified.fill(slot);
        remaining = rest;
    }

    if !remaining.is_empty() {
        return Err(LayoutError::invalid_arguments(inspect_all(remaining)));
    }

    Ok(classified)
}

fn maybe_assert(hook: Option<&dyn AssertionHook>, condition: bool, message: &str) {
    if let Some(hook) = hook {
        hook.assert(condition, message);
    }
}
