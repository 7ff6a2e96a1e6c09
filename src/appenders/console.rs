//! Console appender implementation

use crate::core::{Appender, LogRecord, LoggerError, Result};
use colored::Colorize;
use std::io::{self, Write};

enum ConsoleTarget {
    Stdout,
    Stderr,
    Writer(Box<dyn Write + Send>),
}

/// Writes lines to a terminal stream. Console output is never persisted.
pub struct ConsoleAppender {
    target: ConsoleTarget,
    use_colors: bool,
}

impl ConsoleAppender {
    /// Standard error, the conventional stream for diagnostics
    pub fn stderr() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
            use_colors: false,
        }
    }

    pub fn stdout() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
            use_colors: false,
        }
    }

    /// Write to an arbitrary stream, e.g. a capture buffer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            target: ConsoleTarget::Writer(Box::new(writer)),
            use_colors: false,
        }
    }

    /// Colour whole lines by severity
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn write_line(&mut self, output: &str) -> io::Result<()> {
        match &mut self.target {
            // Lock once so the line and its newline are never split by another thread
            ConsoleTarget::Stdout => writeln!(io::stdout().lock(), "{}", output),
            ConsoleTarget::Stderr => writeln!(io::stderr().lock(), "{}", output),
            ConsoleTarget::Writer(w) => writeln!(w, "{}", output),
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord, line: &str) -> Result<()> {
        let result = if self.use_colors {
            let colored = line.color(record.level().color_code()).to_string();
            self.write_line(&colored)
        } else {
            self.write_line(line)
        };
        result.map_err(|e| {
            LoggerError::io_operation("writing to console", "console write failed", e)
        })
    }

    fn flush(&mut self) -> Result<()> {
        match &mut self.target {
            ConsoleTarget::Stdout => io::stdout().flush()?,
            ConsoleTarget::Stderr => io::stderr().flush()?,
            ConsoleTarget::Writer(w) => w.flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
