//! # Rust Log Router
//!
//! Process-wide structured log routing. Named loggers form a dot-separated
//! hierarchy with inherited thresholds; every record that passes its
//! logger's threshold goes to a single router, which fans it out to a fixed
//! set of sinks:
//!
//! - **console**: INFO and above, except access traffic, on stderr
//! - **application**: `application.log`, everything except access traffic
//! - **access**: `access.log`, only loggers under the `access` prefix
//! - **errors**: `errors.log`, ERROR and above from every logger
//!
//! File sinks rotate by size and keep a bounded number of backups.
//! Configuration happens once per process, on the first [`init`] or
//! [`get_logger`] call.
//!
//! ```no_run
//! use rust_log_router::{get_logger, init, LogConfig};
//!
//! init(LogConfig::new().with_log_dir("logs").with_suppressed(["httpx"]))
//!     .expect("logging setup");
//!
//! let logger = get_logger("deployer");
//! logger.info("deploying build 42");
//! get_logger("access.http").info("GET /health 200");
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
    pub use crate::core::{
        Appender, Formatter, LogConfig, LogLevel, LogRecord, LogRouter, LogSystem, Logger,
        LoggerError, LoggerRegistry, NameFilter, Result, RouterMetrics, Sink, TimestampFormat,
    };
    pub use crate::global::{get_logger, get_logger_with_level, init};
}

pub use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
pub use crate::core::{
    standard_sinks, Appender, Formatter, LogConfig, LogLevel, LogRecord, LogRouter, LogSystem,
    Logger, LoggerError, LoggerRegistry, NameFilter, Result, RouterMetrics, Sink,
    TimestampFormat,
};
pub use crate::global::{get_logger, get_logger_with_level, init, system};
