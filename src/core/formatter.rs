//! Line formatters used by sinks

use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Display name for the root logger (whose registry name is empty)
pub const ROOT_LOGGER_NAME: &str = "root";

/// Turns a record into a single output line (without the trailing newline)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formatter {
    /// `<timestamp> - <name> - <LEVEL> - [<file>:<line>] - <message>`
    Standard(TimestampFormat),

    /// `<timestamp> - <message>`
    Access(TimestampFormat),
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::standard()
    }
}

impl Formatter {
    pub fn standard() -> Self {
        Formatter::Standard(TimestampFormat::default())
    }

    pub fn access() -> Self {
        Formatter::Access(TimestampFormat::default())
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        match self {
            Formatter::Standard(ts) | Formatter::Access(ts) => ts,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(self, format: TimestampFormat) -> Self {
        match self {
            Formatter::Standard(_) => Formatter::Standard(format),
            Formatter::Access(_) => Formatter::Access(format),
        }
    }

    pub fn format(&self, record: &LogRecord) -> String {
        match self {
            Formatter::Standard(ts) => {
                let name = if record.logger().is_empty() {
                    ROOT_LOGGER_NAME
                } else {
                    record.logger()
                };
                let mut line = String::with_capacity(64 + record.message().len());
                // Writing into a String cannot fail
                let _ = write!(
                    line,
                    "{} - {} - {} - [{}:{}] - {}",
                    ts.format(record.timestamp()),
                    name,
                    record.level(),
                    record.file_name().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    record.message()
                );
                line
            }
            Formatter::Access(ts) => {
                format!("{} - {}", ts.format(record.timestamp()), record.message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use chrono::{TimeZone, Utc};

    fn record(name: &str) -> LogRecord {
        let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).single().unwrap();
        LogRecord::new(name, LogLevel::Warning, "disk almost full").with_timestamp(at)
    }

    #[test]
    fn test_standard_layout() {
        let formatter = Formatter::standard().with_timestamp_format(TimestampFormat::Iso8601);
        let line = formatter.format(&record("deployer"));
        assert_eq!(
            line,
            "2025-01-08T10:30:45.000Z - deployer - WARNING - [unknown:0] - disk almost full"
        );
    }

    #[test]
    fn test_standard_includes_location() {
        let rec = record("svc").with_location(std::panic::Location::caller());
        let line = Formatter::standard().format(&rec);
        assert!(line.contains("[formatter.rs:"));
    }

    #[test]
    fn test_root_name() {
        let line = Formatter::standard().format(&record(""));
        assert!(line.contains(" - root - WARNING - "));
    }

    #[test]
    fn test_access_layout() {
        let formatter = Formatter::access().with_timestamp_format(TimestampFormat::Iso8601);
        assert_eq!(
            formatter.format(&record("access")),
            "2025-01-08T10:30:45.000Z - disk almost full"
        );
    }
}
