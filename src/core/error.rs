//! Error types for the log router

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A sink destination could not be created while configuring the router.
    /// Fatal: the router stays unconfigured.
    #[error("Configuration of sink '{sink}' failed: {message}")]
    Configuration { sink: String, message: String },

    /// A single sink failed to write one record
    #[error("Sink '{sink}' failed to write record: {message}")]
    SinkWrite { sink: String, message: String },

    /// A sink panicked while writing
    #[error("Sink '{sink}' panicked: {message}")]
    SinkPanicked { sink: String, message: String },

    /// Unrecognised severity at the logging boundary
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error for the named sink
    pub fn config(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Configuration {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a per-record sink write error
    pub fn sink_write(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            message: message.into(),
        }
    }

    pub fn sink_panicked(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkPanicked {
            sink: sink.into(),
            message: message.into(),
        }
    }

    pub fn invalid_level(level: impl Into<String>) -> Self {
        LoggerError::InvalidLevel(level.into())
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error must abort startup rather than be reported and skipped
    pub fn is_fatal(&self) -> bool {
        matches!(self, LoggerError::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("application", "Permission denied");
        assert!(matches!(err, LoggerError::Configuration { .. }));
        assert!(err.is_fatal());

        let err = LoggerError::sink_write("console", "broken pipe");
        assert!(matches!(err, LoggerError::SinkWrite { .. }));
        assert!(!err.is_fatal());

        let err = LoggerError::invalid_level("LOUD");
        assert!(matches!(err, LoggerError::InvalidLevel(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("errors", "cannot create '/ro/errors.log'");
        assert_eq!(
            err.to_string(),
            "Configuration of sink 'errors' failed: cannot create '/ro/errors.log'"
        );

        let err = LoggerError::file_rotation("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "File rotation failed for '/var/log/app.log': Disk full"
        );

        let err = LoggerError::invalid_level("VERBOSE");
        assert_eq!(err.to_string(), "Invalid log level: 'VERBOSE'");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err =
            LoggerError::io_operation("creating log directory", "cannot create 'logs'", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("creating log directory"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
