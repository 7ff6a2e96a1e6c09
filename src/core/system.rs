//! A registry and its router wired together

use super::{
    config::LogConfig,
    error::Result,
    log_level::LogLevel,
    logger::Logger,
    registry::LoggerRegistry,
    router::{standard_sinks, LogRouter},
    sink::Sink,
};
use crate::appenders::ConsoleAppender;
use parking_lot::Once;
use std::sync::Arc;

/// Level forced onto the loggers listed in [`LogConfig::suppress`]
pub const SUPPRESSED_LEVEL: LogLevel = LogLevel::Warning;

/// One logging world: the logger registry, the router every logger
/// propagates to, and the configuration used to set the router up.
///
/// The process-wide instance lives behind [`crate::init`] and
/// [`crate::get_logger`]; separate instances are useful in tests.
pub struct LogSystem {
    config: LogConfig,
    registry: Arc<LoggerRegistry>,
    /// The single lookup-triggered configuration attempt
    lazy_configure: Once,
}

impl LogSystem {
    /// Create an unconfigured system; no file is touched until
    /// [`LogSystem::configure_once`] or the first logger lookup.
    pub fn new(config: LogConfig) -> Self {
        let router = Arc::new(LogRouter::new());
        let registry = LoggerRegistry::new(router, config.root_level)
            .with_default_levels(config.logger_levels.clone());
        Self {
            config,
            registry: Arc::new(registry),
            lazy_configure: Once::new(),
        }
    }

    /// Install the standard sinks and apply noisy-logger suppression.
    ///
    /// Only the first successful call has an effect; later calls return
    /// `Ok(false)` and change nothing.
    ///
    /// # Errors
    ///
    /// [`LoggerError::Configuration`](crate::LoggerError::Configuration)
    /// when a sink destination cannot be created. Nothing is installed and
    /// the call may be retried.
    pub fn configure_once(&self) -> Result<bool> {
        let config = &self.config;
        self.configure_once_with(|| {
            let console = ConsoleAppender::stderr().with_colors(config.console_colors);
            standard_sinks(config, console)
        })
    }

    /// Like [`LogSystem::configure_once`] with a caller-built sink set.
    ///
    /// Suppression is applied after `build` succeeds and before the sinks
    /// are installed.
    pub fn configure_once_with<F>(&self, build: F) -> Result<bool>
    where
        F: FnOnce() -> Result<Vec<Sink>>,
    {
        self.router().configure_once_with(|| {
            let sinks = build()?;
            self.registry.suppress_noisy(&self.config.suppress, SUPPRESSED_LEVEL);
            Ok(sinks)
        })
    }

    pub fn is_configured(&self) -> bool {
        self.router().is_configured()
    }

    /// Look up (or create) a logger, configuring the router first if no
    /// configuration has happened yet.
    pub fn get_logger(&self, name: &str) -> Logger {
        self.ensure_configured();
        self.registry.get(name, None)
    }

    pub fn get_logger_with_level(&self, name: &str, level: LogLevel) -> Logger {
        self.ensure_configured();
        self.registry.get(name, Some(level))
    }

    pub fn set_level(&self, name: &str, level: LogLevel) {
        self.registry.set_level(name, level);
    }

    /// Force each listed logger to `level`
    pub fn suppress_noisy<I, S>(&self, names: I, level: LogLevel)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.suppress_noisy(names, level);
    }

    pub fn flush(&self) -> Result<()> {
        self.router().flush()
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<LoggerRegistry> {
        &self.registry
    }

    pub fn router(&self) -> &Arc<LogRouter> {
        self.registry.router()
    }

    /// A lookup configures at most once. Concurrent lookups block until that
    /// attempt finishes, so no record is routed to a half-configured system.
    /// A failure is reported and loggers keep working through the fallback
    /// channel; an explicit `configure_once` may still retry.
    fn ensure_configured(&self) {
        if self.is_configured() {
            return;
        }
        self.lazy_configure.call_once(|| {
            if let Err(e) = self.configure_once() {
                eprintln!(
                    "[LOGGER CRITICAL] Logging configuration failed: {}. \
                     Only WARNING and above will reach stderr.",
                    e
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;
    use tempfile::tempdir;

    #[test]
    fn test_first_lookup_configures() {
        let dir = tempdir().unwrap();
        let system = LogSystem::new(LogConfig::new().with_log_dir(dir.path()).with_console(false));
        assert!(!system.is_configured());

        let _logger = system.get_logger("deployer");

        assert!(system.is_configured());
        assert!(dir.path().join("application.log").exists());
        assert!(!system.configure_once().unwrap());
    }

    #[test]
    fn test_suppression_applied_on_configure() {
        let dir = tempdir().unwrap();
        let config = LogConfig::new()
            .with_log_dir(dir.path())
            .with_console(false)
            .with_root_level(LogLevel::Debug)
            .with_suppressed(["httpx", "uvicorn.access"]);
        let system = LogSystem::new(config);

        assert!(system.configure_once().unwrap());

        assert_eq!(system.registry().effective_level("httpx"), LogLevel::Warning);
        assert_eq!(
            system.registry().effective_level("uvicorn.access.h11"),
            LogLevel::Warning
        );
        assert_eq!(system.registry().effective_level("uvicorn"), LogLevel::Debug);
    }

    #[test]
    fn test_suppression_only_follows_a_successful_build() {
        let config = LogConfig::new()
            .with_root_level(LogLevel::Debug)
            .with_suppressed(["httpx"]);
        let system = LogSystem::new(config);

        let failed = system.configure_once_with(|| Err(LoggerError::config("errors", "read-only")));
        assert!(failed.is_err());
        assert_eq!(system.registry().effective_level("httpx"), LogLevel::Debug);

        assert!(system.configure_once_with(|| Ok(vec![])).unwrap());
        assert_eq!(system.registry().effective_level("httpx"), LogLevel::Warning);
    }

    #[test]
    fn test_failed_lazy_configuration_is_not_retried_by_lookups() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let system = LogSystem::new(LogConfig::new().with_log_dir(blocker.join("logs")));

        let logger = system.get_logger("svc");
        let _again = system.get_logger("svc");
        logger.error("goes to stderr");

        assert!(!system.is_configured());
        assert_eq!(system.router().metrics().fallback_writes(), 1);
        assert!(system.configure_once().is_err());
    }
}
