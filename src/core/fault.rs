//! Fault containment for the formatting pipeline
//!
//! Formatting runs application-supplied values through encoders and
//! `ErrorLike` implementations, any of which may fail or panic. A failure
//! moves the call down one [`FaultTier`]; every tier still produces a
//! newline-terminated string, and the last tier is a constant.

use super::config::LayoutConfig;
use super::error_value::{CapturedError, ErrorValue};
use super::output_format::{describe_error, finish_lines};
use super::render::display_text;
use std::any::Any;
use std::fmt;
use std::io::{self, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};

pub const SINGLE_FAULT_MARKER: &str = "[Chalk::Log fault: Could not format message]";
pub const DOUBLE_FAULT_MARKER: &str = "[Chalk::Log fault: Double fault while formatting message]";
pub const TRIPLE_FAULT_MARKER: &str = "[Chalk::Log fault: Triple fault while formatting message]";

const TRIPLE_FAULT_LINE: &str = "[Chalk::Log fault: Triple fault while formatting message]\n";

/// Degradation level a format call finished at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FaultTier {
    /// Regular output
    Normal,
    /// Marker line plus a description of the failure
    Degraded1,
    /// Describing the failure failed; marker line only
    Degraded2,
    /// Constant marker line
    Degraded3,
}

impl FaultTier {
    /// Tier to fall back to when producing this tier's output failed
    pub fn next(self) -> FaultTier {
        match self {
            FaultTier::Normal => FaultTier::Degraded1,
            FaultTier::Degraded1 => FaultTier::Degraded2,
            FaultTier::Degraded2 | FaultTier::Degraded3 => FaultTier::Degraded3,
        }
    }

    pub fn is_degraded(self) -> bool {
        self != FaultTier::Normal
    }
}

impl fmt::Display for FaultTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultTier::Normal => "normal",
            FaultTier::Degraded1 => "single fault",
            FaultTier::Degraded2 => "double fault",
            FaultTier::Degraded3 => "triple fault",
        };
        f.write_str(name)
    }
}

/// Output of a format call together with the tier that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub output: String,
    pub tier: FaultTier,
}

/// Run a pipeline through the fault tiers.
///
/// `prefix` is the tag prefix computed from trusted ambient context; it is
/// applied to the single-fault output like any tagged-text line.
pub(crate) fn run_tiers<F>(pipeline: F, prefix: &str, config: &LayoutConfig) -> Formatted
where
    F: FnOnce() -> Result<String, ErrorValue>,
{
    let mut fault = match contain(pipeline) {
        Ok(output) => {
            return Formatted {
                output,
                tier: FaultTier::Normal,
            }
        }
        Err(fault) => fault,
    };

    let mut tier = FaultTier::Normal;
    loop {
        tier = tier.next();
        if config.fault_reports {
            report_fault(&mut io::stderr(), tier);
        }

        let attempt = match tier {
            FaultTier::Degraded1 => contain(|| single_fault(&fault, prefix, config)),
            FaultTier::Degraded2 => contain(|| double_fault(&fault)),
            FaultTier::Normal | FaultTier::Degraded3 => {
                return Formatted {
                    output: TRIPLE_FAULT_LINE.to_string(),
                    tier: FaultTier::Degraded3,
                }
            }
        };

        match attempt {
            Ok(output) => return Formatted { output, tier },
            Err(next) => fault = next,
        }
    }
}

/// Diagnostic line for entering a degraded tier. A failed write is dropped;
/// this must never panic.
fn report_fault<W: Write>(sink: &mut W, tier: FaultTier) {
    let _ = writeln!(
        sink,
        "[LOGGER ERROR] Could not format log event, falling back to {} output",
        tier
    );
}

/// Marker, then the failure's class, text and frames, tag-prefixed
fn single_fault(
    fault: &ErrorValue,
    prefix: &str,
    config: &LayoutConfig,
) -> Result<String, ErrorValue> {
    let body = format!("{} {}\n", SINGLE_FAULT_MARKER, describe_error(fault)?);
    Ok(finish_lines(&body, prefix, config))
}

/// Marker naming only the class of the fault that broke the single-fault
/// output. Its message is never touched.
///
/// The class is the one detail added beyond the bare marker line. Reading it
/// can fail too, which is what sends a call on to the constant triple-fault
/// line.
fn double_fault(fault: &ErrorValue) -> Result<String, ErrorValue> {
    let class_name = fault.class_name()?;
    Ok(format!(
        "{} {}\n",
        DOUBLE_FAULT_MARKER,
        display_text("error_class", &class_name)
    ))
}

/// Run `f`, turning both returned faults and panics into `Err`
fn contain<F>(f: F) -> Result<String, ErrorValue>
where
    F: FnOnce() -> Result<String, ErrorValue>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(panic_info) => Err(panic_fault(panic_info)),
    }
}

fn panic_fault(panic_info: Box<dyn Any + Send>) -> ErrorValue {
    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    };
    ErrorValue::new(CapturedError::new("Panic", panic_msg))
}
