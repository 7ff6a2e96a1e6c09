//! Router configuration

use super::{error::Result, log_level::LogLevel, timestamp::TimestampFormat};
use crate::appenders::rotating_file::{DEFAULT_BACKUP_COUNT, DEFAULT_MAX_BYTES};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Backups kept for `errors.log`
pub const DEFAULT_ERROR_BACKUP_COUNT: usize = 10;

/// Inputs to the one-time router configuration.
///
/// Every field has a default, so a JSON document only needs the keys it
/// wants to change.
///
/// # Example
///
/// ```
/// use rust_log_router::{LogConfig, LogLevel};
///
/// let config = LogConfig::from_json(r#"{
///     "log_dir": "/var/log/deployer",
///     "max_bytes": 1048576,
///     "suppress": ["httpx", "asyncio"]
/// }"#)?;
///
/// assert_eq!(config.backup_count, 5);
/// assert_eq!(config.root_level, LogLevel::Info);
/// # Ok::<(), rust_log_router::LoggerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory holding `application.log`, `access.log` and `errors.log`
    pub log_dir: PathBuf,
    /// Per-segment cap for every rotating file
    pub max_bytes: u64,
    /// Backups kept for the application and access files
    pub backup_count: usize,
    /// Backups kept for the error file
    pub error_backup_count: usize,
    /// Threshold of the root logger
    pub root_level: LogLevel,
    /// Level given to a logger when it is first looked up without one
    pub logger_levels: HashMap<String, LogLevel>,
    /// Logger names forced to WARNING once configuration succeeds
    pub suppress: Vec<String>,
    /// Whether the console sink is installed
    pub console: bool,
    pub console_colors: bool,
    /// Names starting with this prefix are access records
    pub access_prefix: String,
    pub timestamp_format: TimestampFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
            error_backup_count: DEFAULT_ERROR_BACKUP_COUNT,
            root_level: LogLevel::Info,
            logger_levels: HashMap::new(),
            suppress: Vec::new(),
            console: true,
            console_colors: false,
            access_prefix: "access".to_string(),
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_backup_count(mut self, count: usize) -> Self {
        self.backup_count = count;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_error_backup_count(mut self, count: usize) -> Self {
        self.error_backup_count = count;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_root_level(mut self, level: LogLevel) -> Self {
        self.root_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_logger_level(mut self, name: impl Into<String>, level: LogLevel) -> Self {
        self.logger_levels.insert(name.into(), level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_suppressed<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suppress.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_console_colors(mut self, enabled: bool) -> Self {
        self.console_colors = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_access_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.access_prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}
