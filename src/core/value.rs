//! Loosely-typed values passed by log call sites
//!
//! This module provides:
//! - `LogValue`: closed set of value shapes a log call may carry
//! - `FieldMap`: ordered key/value bag used for info and metadata
//! - `inspect`: debug representation used when JSON encoding fails

use super::error_value::{CapturedError, ErrorValue};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt::{self, Write as _};

/// A single positional argument or info/meta value
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Raw bytes that may not be valid UTF-8
    Bytes(Vec<u8>),
    List(Vec<LogValue>),
    Map(FieldMap),
    Error(ErrorValue),
}

impl LogValue {
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        LogValue::Bytes(bytes.into())
    }

    pub fn error<E: super::error_value::ErrorLike + 'static>(error: E) -> Self {
        LogValue::Error(ErrorValue::new(error))
    }

    /// Nil and booleans are legacy no-op trailing arguments
    pub fn is_ignorable(&self) -> bool {
        matches!(self, LogValue::Nil | LogValue::Bool(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LogValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&FieldMap> {
        match self {
            LogValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            LogValue::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Debug representation that never fails
    pub fn inspect(&self) -> String {
        let mut out = String::new();
        self.write_inspect(&mut out);
        out
    }

    fn write_inspect(&self, out: &mut String) {
        match self {
            LogValue::Nil => out.push_str("nil"),
            LogValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            LogValue::Int(i) => {
                let _ = write!(out, "{}", i);
            }
            LogValue::Float(f) => {
                if f.is_nan() {
                    out.push_str("NaN");
                } else if f.is_infinite() {
                    out.push_str(if *f > 0.0 { "Infinity" } else { "-Infinity" });
                } else {
                    let _ = write!(out, "{:?}", f);
                }
            }
            LogValue::Text(s) => {
                out.push('"');
                escape_into(s, out);
                out.push('"');
            }
            LogValue::Bytes(bytes) => {
                out.push('"');
                for chunk in bytes.utf8_chunks() {
                    escape_into(chunk.valid(), out);
                    for b in chunk.invalid() {
                        let _ = write!(out, "\\x{:02X}", b);
                    }
                }
                out.push('"');
            }
            LogValue::List(items) => {
                out.push('[');
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    item.write_inspect(out);
                }
                out.push(']');
            }
            LogValue::Map(map) => {
                out.push('{');
                for (idx, (key, value)) in map.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    out.push('"');
                    escape_into(key, out);
                    out.push_str("\" => ");
                    value.write_inspect(out);
                }
                out.push('}');
            }
            LogValue::Error(err) => {
                let class_name = err.class_name().unwrap_or_else(|_| "Error".to_string());
                match err.message() {
                    Ok(message) => {
                        let _ = write!(out, "#<{}: {}>", class_name, message);
                    }
                    Err(_) => {
                        let _ = write!(out, "#<{}>", class_name);
                    }
                }
            }
        }
    }
}

/// Inspect a whole argument list, e.g. for leftover-argument errors
pub fn inspect_all(values: &[LogValue]) -> String {
    LogValue::List(values.to_vec()).inspect()
}

fn escape_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

impl Serialize for LogValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LogValue::Nil => serializer.serialize_unit(),
            LogValue::Bool(b) => serializer.serialize_bool(*b),
            LogValue::Int(i) => serializer.serialize_i64(*i),
            LogValue::Float(f) => {
                if !f.is_finite() {
                    return Err(S::Error::custom(format!("{} not allowed in JSON", f)));
                }
                serializer.serialize_f64(*f)
            }
            LogValue::Text(s) => serializer.serialize_str(s),
            LogValue::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(s) => serializer.serialize_str(s),
                Err(e) => Err(S::Error::custom(format!(
                    "source sequence is illegal/malformed utf-8: {}",
                    e
                ))),
            },
            LogValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            LogValue::Map(map) => map.serialize(serializer),
            LogValue::Error(err) => err.serialize(serializer),
        }
    }
}

impl Serialize for ErrorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let class_name = self
            .class_name()
            .map_err(|_| S::Error::custom("error class name could not be produced"))?;
        let message = self
            .message()
            .map_err(|_| S::Error::custom("error message could not be produced"))?;
        let backtrace = self.backtrace();

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("error_class", &class_name)?;
        map.serialize_entry("message", &message)?;
        if let Some(frames) = backtrace {
            map.serialize_entry("backtrace", &frames)?;
        }
        map.end()
    }
}

/// Ordered mapping of key to value. Inserting an existing key replaces the
/// value in place, keeping the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, LogValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a field (builder version)
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<LogValue>,
    {
        self.insert(key, value);
        self
    }

    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<LogValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&LogValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LogValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<LogValue>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Text(s)
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Text(s.to_string())
    }
}

impl From<&String> for LogValue {
    fn from(s: &String) -> Self {
        LogValue::Text(s.clone())
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<i64> for LogValue {
    fn from(i: i64) -> Self {
        LogValue::Int(i)
    }
}

impl From<i32> for LogValue {
    fn from(i: i32) -> Self {
        LogValue::Int(i as i64)
    }
}

impl From<u32> for LogValue {
    fn from(i: u32) -> Self {
        LogValue::Int(i as i64)
    }
}

impl From<u64> for LogValue {
    fn from(i: u64) -> Self {
        i64::try_from(i)
            .map(LogValue::Int)
            .unwrap_or(LogValue::Float(i as f64))
    }
}

impl From<usize> for LogValue {
    fn from(i: usize) -> Self {
        i64::try_from(i)
            .map(LogValue::Int)
            .unwrap_or(LogValue::Float(i as f64))
    }
}

impl From<f64> for LogValue {
    fn from(f: f64) -> Self {
        LogValue::Float(f)
    }
}

impl From<f32> for LogValue {
    fn from(f: f32) -> Self {
        LogValue::Float(f as f64)
    }
}

impl From<FieldMap> for LogValue {
    fn from(map: FieldMap) -> Self {
        LogValue::Map(map)
    }
}

impl From<ErrorValue> for LogValue {
    fn from(err: ErrorValue) -> Self {
        LogValue::Error(err)
    }
}

impl From<CapturedError> for LogValue {
    fn from(err: CapturedError) -> Self {
        LogValue::Error(ErrorValue::new(err))
    }
}

impl<T: Into<LogValue>> From<Vec<T>> for LogValue {
    fn from(items: Vec<T>) -> Self {
        LogValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(LogValue::Nil)
    }
}
