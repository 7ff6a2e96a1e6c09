//! Formatting macros over [`Logger`](crate::Logger).
//!
//! The message is only formatted when the logger's effective level lets the
//! record through, and the recorded source location is the macro call site.
//!
//! # Examples
//!
//! ```
//! use rust_log_router::{info, LogConfig, LogSystem};
//!
//! let system = LogSystem::new(LogConfig::default());
//! let logger = system.registry().get("deployer", None);
//!
//! info!(logger, "Deploy started");
//! let build = 42;
//! info!(logger, "Deploying build {}", build);
//! ```

/// Log a formatted message at an explicit level.
///
/// ```
/// # use rust_log_router::{LogConfig, LogLevel, LogSystem};
/// # let logger = LogSystem::new(LogConfig::default()).registry().get("svc", None);
/// use rust_log_router::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.is_enabled_for(level) {
            logger.log(level, format!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a WARNING record.
///
/// ```
/// # use rust_log_router::{LogConfig, LogSystem};
/// # let logger = LogSystem::new(LogConfig::default()).registry().get("svc", None);
/// use rust_log_router::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}
