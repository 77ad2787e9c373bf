//! # Chalk Log
//!
//! A fault-tolerant structured log event formatter.
//!
//! ## Features
//!
//! - **Permissive call shapes**: `message`, `message, error`, `message, info`
//!   and `meta, message, error, info` are all accepted positionally
//! - **Two output formats**: single-line JSON or tagged human-readable text
//! - **Never crashes the caller**: malformed or hostile values degrade the
//!   output through fault tiers instead of propagating
//! - **Thread Safe**: a `Layout` holds only read-only configuration

pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        ActionScope, Ambient, AssertionHook, CapturedError, ErrorLike, ErrorValue, FaultTier,
        FieldMap, Formatted, Layout, LayoutConfig, LayoutError, LogLevel, LogValue, OutputFormat,
        Result,
    };
}

pub use crate::core::{
    ActionScope, Ambient, AssertionHook, CapturedError, ErrorLike, ErrorValue, FaultTier,
    FieldMap, Formatted, Layout, LayoutConfig, LayoutError, LogLevel, LogValue, OutputFormat,
    Result,
};
