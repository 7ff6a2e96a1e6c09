//! Logger handles

use super::{
    error::Result,
    log_level::LogLevel,
    log_record::LogRecord,
    registry::{LoggerNode, LoggerRegistry},
};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Cheap, cloneable handle to a named logger.
///
/// All handles for one name share the same threshold: a `set_level` through
/// any of them (or through the registry) is seen by all of them. Records
/// that pass the threshold are always propagated to the router.
///
/// # Example
///
/// ```
/// use rust_log_router::{LogConfig, LogLevel, LogSystem};
///
/// let system = LogSystem::new(LogConfig::default());
/// let logger = system.registry().get("deployer", Some(LogLevel::Warning));
///
/// assert!(logger.is_enabled_for(LogLevel::Error));
/// assert!(!logger.is_enabled_for(LogLevel::Info));
/// ```
#[derive(Clone)]
pub struct Logger {
    node: Arc<LoggerNode>,
    registry: Arc<LoggerRegistry>,
}

impl Logger {
    pub(crate) fn new(node: Arc<LoggerNode>, registry: Arc<LoggerRegistry>) -> Self {
        Self { node, registry }
    }

    /// Whether both handles refer to the same logger
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }

    pub fn name(&self) -> &str {
        self.node.name()
    }

    /// Explicit threshold; `None` means inherited
    pub fn level(&self) -> Option<LogLevel> {
        self.node.level()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.registry.set_node_level(&self.node, level);
    }

    pub fn effective_level(&self) -> LogLevel {
        self.registry.resolve(&self.node)
    }

    #[inline]
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.effective_level()
    }

    /// Records always travel up to the router
    pub fn propagate(&self) -> bool {
        true
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if !self.is_enabled_for(level) {
            return;
        }

        let record = LogRecord::new(self.name(), level, message).with_location(Location::caller());
        self.registry.router().route(&record);
    }

    /// Log with a severity given as text (`"info"`, `"WARNING"`, …)
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidLevel`](crate::LoggerError::InvalidLevel) if the
    /// name is not a known level; nothing is logged in that case.
    #[track_caller]
    pub fn log_named(&self, level: &str, message: impl AsRef<str>) -> Result<()> {
        let level: LogLevel = level.parse()?;
        self.log(level, message);
        Ok(())
    }

    /// Log with a numeric severity (10 = DEBUG … 50 = CRITICAL)
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidLevel`](crate::LoggerError::InvalidLevel) for
    /// any other value; nothing is logged in that case.
    #[track_caller]
    pub fn log_numeric(&self, level: u8, message: impl AsRef<str>) -> Result<()> {
        let level = LogLevel::try_from(level)?;
        self.log(level, message);
        Ok(())
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Critical, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .finish()
    }
}
