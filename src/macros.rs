//! Macros for building log call arguments.
//!
//! These macros let call sites pass heterogeneous arguments the way the
//! layout expects them: an optional leading metadata map, a message, an
//! error and a trailing info map.
//!
//! # Examples
//!
//! ```
//! use chalk_log::prelude::*;
//! use chalk_log::{fields, format_log, log_args};
//!
//! let layout = Layout::default();
//!
//! // Message only
//! let args = log_args!["Server started"];
//! assert_eq!(args.len(), 1);
//!
//! // Message with info
//! let port = 8080;
//! let args = log_args!["Booting the server on:", fields! { "port" => port }];
//! assert_eq!(args.len(), 2);
//!
//! // Format directly with the current time, pid and action id
//! let line = format_log!(layout, LogLevel::Info, "Server started").unwrap();
//! assert!(line.ends_with("Server started\n"));
//! ```

/// Build a [`FieldMap`](crate::core::FieldMap) from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use chalk_log::fields;
///
/// let info = fields! { "user" => "alice", "attempts" => 3 };
/// assert_eq!(info.len(), 2);
///
/// let empty = fields! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::core::FieldMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::core::FieldMap::new();
        $( map.insert($key, $value); )+
        map
    }};
}

/// Build a positional argument list, converting each argument into a
/// [`LogValue`](crate::core::LogValue).
///
/// # Examples
///
/// ```
/// use chalk_log::core::{CapturedError, LogValue};
/// use chalk_log::{fields, log_args};
///
/// let err = CapturedError::new("Timeout", "upstream took too long");
/// let args = log_args![fields! { "id" => "req-1" }, "Request failed", err, fields! { "retries" => 2 }];
/// assert!(matches!(args[2], LogValue::Error(_)));
/// ```
#[macro_export]
macro_rules! log_args {
    () => {
        ::std::vec::Vec::<$crate::core::LogValue>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::core::LogValue::from($arg)),+]
    };
}

/// Format a log call at `level` with ambient context captured now.
///
/// # Examples
///
/// ```
/// # use chalk_log::prelude::*;
/// use chalk_log::{fields, format_log};
///
/// let layout = Layout::new(LayoutConfig::new().with_tagging_disabled(true));
/// let line = format_log!(layout, LogLevel::Warn, "Disk low", fields! { "free_mb" => 12 }).unwrap();
/// assert_eq!(line, "Disk low: free_mb=12\n");
/// ```
#[macro_export]
macro_rules! format_log {
    ($layout:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        $layout.format_now($level, &$crate::log_args![$($arg),*])
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{FieldMap, LogValue};

    #[test]
    fn test_fields_macro() {
        let map = fields! { "a" => 1, "b" => "two", };
        assert_eq!(map, FieldMap::new().with_field("a", 1).with_field("b", "two"));
    }

    #[test]
    fn test_log_args_macro() {
        let args = log_args!["msg", fields! { "k" => "v" }];
        assert_eq!(args[0], LogValue::from("msg"));
        assert!(matches!(args[1], LogValue::Map(_)));

        let empty = log_args![];
        assert!(empty.is_empty());
    }
}
