//! Core router types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod router;
pub mod sink;
pub mod system;
pub mod timestamp;

pub use appender::Appender;
pub use config::{LogConfig, DEFAULT_ERROR_BACKUP_COUNT};
pub use error::{LoggerError, Result};
pub use filter::NameFilter;
pub use formatter::{Formatter, ROOT_LOGGER_NAME};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::Logger;
pub use metrics::RouterMetrics;
pub use registry::{LoggerRegistry, ROOT};
pub use router::{
    standard_sinks, LogRouter, ACCESS_LOG, ACCESS_SINK, APPLICATION_LOG, APPLICATION_SINK,
    CONSOLE_SINK, ERROR_LOG, ERROR_SINK,
};
pub use sink::Sink;
pub use system::{LogSystem, SUPPRESSED_LEVEL};
pub use timestamp::TimestampFormat;
