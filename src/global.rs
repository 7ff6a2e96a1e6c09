//! The process-wide logging system
//!
//! Nothing is configured merely by linking this crate. The process entry
//! point calls [`init`] once; callers elsewhere use [`get_logger`]. If
//! [`get_logger`] runs first, the system is created from
//! `LogConfig::default()` and a later [`init`] cannot replace that config.

use crate::core::{LogConfig, LogLevel, LogSystem, Logger, Result};
use std::sync::OnceLock;

static SYSTEM: OnceLock<LogSystem> = OnceLock::new();

/// Create the process-wide system from `config` and configure it.
///
/// Safe to call more than once: only the first call's config is used and
/// configuration only happens once.
///
/// # Errors
///
/// [`LoggerError::Configuration`](crate::LoggerError::Configuration) if a
/// sink cannot be created; startup should abort.
///
/// # Example
///
/// ```no_run
/// use rust_log_router::{LogConfig, get_logger, init};
///
/// fn main() -> rust_log_router::Result<()> {
///     init(LogConfig::new().with_log_dir("/var/log/deployer"))?;
///     get_logger("deployer").info("started");
///     Ok(())
/// }
/// ```
pub fn init(config: LogConfig) -> Result<&'static LogSystem> {
    let system = SYSTEM.get_or_init(|| LogSystem::new(config));
    system.configure_once()?;
    Ok(system)
}

/// The process-wide system, created with default config if [`init`] has not run
pub fn system() -> &'static LogSystem {
    SYSTEM.get_or_init(|| LogSystem::new(LogConfig::default()))
}

pub fn get_logger(name: &str) -> Logger {
    system().get_logger(name)
}

pub fn get_logger_with_level(name: &str, level: LogLevel) -> Logger {
    system().get_logger_with_level(name, level)
}
