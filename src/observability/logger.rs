//! Structured JSON logger for the query engine
//!
//! One log line = one event, written synchronously with no buffering.
//! Lines are JSON objects with deterministic (sorted) key order, so repeated
//! runs over the same data produce byte-identical logs.

use std::fmt;
use std::io::{self, Write};

use serde_json::{Map, Value};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-page and per-range detail
    Trace = 0,
    /// Normal query lifecycle
    Info = 1,
    /// Degraded but recoverable situations
    Warn = 2,
    /// Query failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous structured logger
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, String)]) {
        match severity {
            Severity::Error => Self::log_to_writer(severity, event, fields, &mut io::stderr()),
            _ => Self::log_to_writer(severity, event, fields, &mut io::stdout()),
        }
    }

    /// Log at TRACE level
    pub fn trace(event: &str, fields: &[(&str, String)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, String)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, String)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, String)]) {
        Self::log(Severity::Error, event, fields);
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, String)],
        writer: &mut W,
    ) {
        // serde_json maps are ordered, so key order is deterministic
        let mut line = Map::new();
        line.insert("event".into(), Value::String(event.to_string()));
        line.insert("severity".into(), Value::String(severity.as_str().into()));
        for (key, value) in fields {
            line.insert((*key).into(), Value::String(value.clone()));
        }

        let mut output = Value::Object(line).to_string();
        output.push('\n');

        // One write_all call, one line
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }
}

/// Capture one log line to a string for testing
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, String)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
