//! Log record structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::panic::Location;
use std::path::Path;

/// One discrete log event. Fields are private so a record cannot change
/// after it has been handed to the router.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    timestamp: DateTime<Utc>,
    logger: String,
    level: LogLevel,
    message: String,
    file: Option<&'static str>,
    line: Option<u32>,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one record always occupies exactly one output line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(logger: impl Into<String>, level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            timestamp: Utc::now(),
            logger: logger.into(),
            level,
            message: Self::sanitize_message(message.as_ref()),
            file: None,
            line: None,
        }
    }

    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.file = Some(location.file());
        self.line = Some(location.line());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    /// Originating logger name; empty for the root logger
    pub fn logger(&self) -> &str {
        &self.logger
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn file(&self) -> Option<&'static str> {
        self.file
    }

    /// Base name of the source file, e.g. `main.rs`
    pub fn file_name(&self) -> Option<&str> {
        self.file
            .map(|f| Path::new(f).file_name().and_then(|n| n.to_str()).unwrap_or(f))
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_single_line() {
        let record = LogRecord::new("svc", LogLevel::Info, "first\nsecond\r\tthird");
        assert_eq!(record.message(), "first\\nsecond\\r\\tthird");
        assert!(!record.message().contains('\n'));
    }

    #[test]
    fn test_location_capture() {
        let record = LogRecord::new("svc", LogLevel::Debug, "hi").with_location(Location::caller());
        assert_eq!(record.file_name(), Some("log_record.rs"));
        assert!(record.line().is_some());
    }

    #[test]
    fn test_without_location() {
        let record = LogRecord::new("", LogLevel::Error, "boom");
        assert_eq!(record.logger(), "");
        assert_eq!(record.file_name(), None);
        assert_eq!(record.line(), None);
    }
}
