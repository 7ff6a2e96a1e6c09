//! Appender trait for sink destinations

use super::{error::Result, log_record::LogRecord};

/// A destination that persists already formatted lines.
///
/// `line` has no trailing newline; the appender terminates it. The record is
/// passed alongside for destinations that vary output by severity.
pub trait Appender: Send {
    fn append(&mut self, record: &LogRecord, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
