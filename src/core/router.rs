//! The root router: one-time sink setup and per-record fan-out

use super::{
    config::LogConfig,
    error::{LoggerError, Result},
    filter::NameFilter,
    formatter::Formatter,
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::RouterMetrics,
    sink::Sink,
};
use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
use parking_lot::Mutex;
use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

pub const CONSOLE_SINK: &str = "console";
pub const APPLICATION_SINK: &str = "application";
pub const ACCESS_SINK: &str = "access";
pub const ERROR_SINK: &str = "errors";

pub const APPLICATION_LOG: &str = "application.log";
pub const ACCESS_LOG: &str = "access.log";
pub const ERROR_LOG: &str = "errors.log";

/// Owns the sink set and delivers every record to each sink that accepts it.
///
/// The router starts unconfigured. The first successful `configure_once*`
/// installs its sinks; afterwards the sink list never changes and is read
/// without locking. Before that, records at WARNING or above are written to
/// the fallback channel (stderr) so early problems are not lost.
pub struct LogRouter {
    sinks: OnceLock<Vec<Sink>>,
    /// Serialises sink construction so only one candidate set is ever built
    setup: Mutex<()>,
    metrics: RouterMetrics,
}

impl LogRouter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sinks: OnceLock::new(),
            setup: Mutex::new(()),
            metrics: RouterMetrics::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.sinks.get().is_some()
    }

    /// Install the standard sinks described by `config`.
    ///
    /// Returns `Ok(true)` if this call configured the router and `Ok(false)`
    /// if it already was configured (nothing is touched in that case).
    ///
    /// # Errors
    ///
    /// [`LoggerError::Configuration`] if a destination cannot be created.
    /// The router then stays unconfigured; no sink is installed.
    pub fn configure_once(&self, config: &LogConfig) -> Result<bool> {
        self.configure_once_with(|| {
            let console = ConsoleAppender::stderr().with_colors(config.console_colors);
            standard_sinks(config, console)
        })
    }

    /// Install the sinks produced by `build`, if no sinks are installed yet.
    ///
    /// `build` runs at most once per successful configuration and under the
    /// setup lock; it must not call back into `configure_once*`. Records
    /// logged while it runs take the fallback path.
    pub fn configure_once_with<F>(&self, build: F) -> Result<bool>
    where
        F: FnOnce() -> Result<Vec<Sink>>,
    {
        if self.is_configured() {
            return Ok(false);
        }

        let _guard = self.setup.lock();
        if self.is_configured() {
            return Ok(false);
        }

        let sinks = build()?;
        // Cannot already be set: every writer holds the setup lock
        Ok(self.sinks.set(sinks).is_ok())
    }

    /// Installed sinks in fan-out order; empty while unconfigured
    pub fn sinks(&self) -> &[Sink] {
        self.sinks.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn sink(&self, name: &str) -> Option<&Sink> {
        self.sinks().iter().find(|s| s.name() == name)
    }

    /// Deliver `record` to every sink whose threshold and filters pass.
    ///
    /// A failing or panicking sink is reported to the fallback channel and
    /// skipped; the remaining sinks still receive the record. Nothing is
    /// returned to the caller.
    pub fn route(&self, record: &LogRecord) {
        self.metrics.record_routed();

        let Some(sinks) = self.sinks.get() else {
            self.write_fallback(record);
            return;
        };

        for sink in sinks.iter().filter(|s| s.accepts(record)) {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| sink.write(record)));
            let result = match outcome {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(LoggerError::sink_write(sink.name(), e.to_string())),
                Err(payload) => {
                    Err(LoggerError::sink_panicked(sink.name(), panic_message(&*payload)))
                }
            };

            match result {
                Ok(()) => {
                    self.metrics.record_delivered();
                }
                Err(e) => {
                    self.metrics.record_sink_failure();
                    report_sink_failure(&e);
                }
            }
        }
    }

    /// Flush every sink, returning the first error after trying all of them
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for sink in self.sinks() {
            if let Err(e) = sink.flush() {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }

    /// Last-resort output while no sinks are installed. Never touches the
    /// setup lock.
    fn write_fallback(&self, record: &LogRecord) {
        if record.level() >= LogLevel::Warning {
            self.metrics.record_fallback();
            eprintln!("{}", Formatter::standard().format(record));
        }
    }
}

impl Default for LogRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the standard sink set in fan-out order: console, application,
/// access, errors.
///
/// Either every destination is created or an error is returned and the
/// already-built sinks are dropped.
pub fn standard_sinks(config: &LogConfig, console: ConsoleAppender) -> Result<Vec<Sink>> {
    fs::create_dir_all(&config.log_dir).map_err(|e| {
        LoggerError::config(
            "log_dir",
            format!("cannot create '{}': {}", config.log_dir.display(), e),
        )
    })?;

    let standard = Formatter::standard().with_timestamp_format(config.timestamp_format.clone());
    let access = Formatter::access().with_timestamp_format(config.timestamp_format.clone());
    let prefix = config.access_prefix.as_str();

    let mut sinks = Vec::with_capacity(4);

    if config.console {
        sinks.push(
            Sink::new(CONSOLE_SINK, console)
                .with_threshold(LogLevel::Info)
                .with_filter(NameFilter::lacks_prefix(prefix))
                .with_formatter(standard.clone()),
        );
    }

    let policy = RotationPolicy::new()
        .with_max_bytes(config.max_bytes)
        .with_max_backups(config.backup_count);

    sinks.push(
        Sink::new(
            APPLICATION_SINK,
            rotating_file(config, APPLICATION_SINK, APPLICATION_LOG, policy.clone())?,
        )
        .with_threshold(LogLevel::Debug)
        .with_filter(NameFilter::lacks_prefix(prefix))
        .with_formatter(standard.clone()),
    );

    sinks.push(
        Sink::new(ACCESS_SINK, rotating_file(config, ACCESS_SINK, ACCESS_LOG, policy.clone())?)
            .with_threshold(LogLevel::Info)
            .with_filter(NameFilter::has_prefix(prefix))
            .with_formatter(access),
    );

    sinks.push(
        Sink::new(
            ERROR_SINK,
            rotating_file(
                config,
                ERROR_SINK,
                ERROR_LOG,
                policy.with_max_backups(config.error_backup_count),
            )?,
        )
        .with_threshold(LogLevel::Error)
        .with_formatter(standard),
    );

    Ok(sinks)
}

fn rotating_file(
    config: &LogConfig,
    sink: &str,
    file_name: &str,
    policy: RotationPolicy,
) -> Result<RotatingFileAppender> {
    RotatingFileAppender::with_policy(config.log_dir.join(file_name), policy)
        .map_err(|e| LoggerError::config(sink, e.to_string()))
}

fn report_sink_failure(error: &LoggerError) {
    match error {
        LoggerError::SinkPanicked { .. } => eprintln!(
            "[LOGGER CRITICAL] {}. Other sinks continue to function.",
            error
        ),
        _ => eprintln!("[LOGGER ERROR] {}", error),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
