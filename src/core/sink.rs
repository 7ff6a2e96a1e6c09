//! Sinks: threshold + filters + formatter in front of one appender

use super::{
    appender::Appender,
    error::Result,
    filter::NameFilter,
    formatter::Formatter,
    log_level::LogLevel,
    log_record::LogRecord,
};
use parking_lot::Mutex;
use std::fmt;

/// A routing destination.
///
/// Each sink owns its own lock around the appender, so records bound for
/// different sinks never contend with each other. Format, append and any
/// rotation the appender performs all happen inside that one lock.
///
/// # Example
///
/// ```
/// use rust_log_router::appenders::ConsoleAppender;
/// use rust_log_router::core::{LogLevel, LogRecord, NameFilter, Sink};
///
/// let sink = Sink::new("console", ConsoleAppender::stderr())
///     .with_threshold(LogLevel::Info)
///     .with_filter(NameFilter::lacks_prefix("access"));
///
/// assert!(sink.accepts(&LogRecord::new("deployer", LogLevel::Info, "up")));
/// assert!(!sink.accepts(&LogRecord::new("deployer", LogLevel::Debug, "detail")));
/// assert!(!sink.accepts(&LogRecord::new("access", LogLevel::Info, "GET /")));
/// ```
pub struct Sink {
    name: String,
    threshold: LogLevel,
    filters: Vec<NameFilter>,
    formatter: Formatter,
    destination: Mutex<Box<dyn Appender>>,
}

impl Sink {
    /// Create a sink that accepts everything (DEBUG and above, no filters)
    pub fn new<A: Appender + 'static>(name: impl Into<String>, appender: A) -> Self {
        Self::from_boxed(name, Box::new(appender))
    }

    pub fn from_boxed(name: impl Into<String>, appender: Box<dyn Appender>) -> Self {
        Self {
            name: name.into(),
            threshold: LogLevel::Debug,
            filters: Vec::new(),
            formatter: Formatter::default(),
            destination: Mutex::new(appender),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_threshold(mut self, threshold: LogLevel) -> Self {
        self.threshold = threshold;
        self
    }

    /// Append a filter; all filters must accept for the sink to pass
    #[must_use = "builder methods return a new value"]
    pub fn with_filter(mut self, filter: NameFilter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn filters(&self) -> &[NameFilter] {
        &self.filters
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Threshold AND every filter
    pub fn accepts(&self, record: &LogRecord) -> bool {
        record.level() >= self.threshold && self.filters.iter().all(|f| f.accepts(record))
    }

    /// Format and append one record. Does not re-check [`Sink::accepts`].
    pub fn write(&self, record: &LogRecord) -> Result<()> {
        let line = self.formatter.format(record);
        let mut destination = self.destination.lock();
        destination.append(record, &line)
    }

    pub fn flush(&self) -> Result<()> {
        self.destination.lock().flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("name", &self.name)
            .field("threshold", &self.threshold)
            .field("filters", &self.filters)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Collect(Arc<Mutex<Vec<String>>>);

    impl Appender for Collect {
        fn append(&mut self, _record: &LogRecord, line: &str) -> Result<()> {
            self.0.lock().push(line.to_string());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "collect"
        }
    }

    #[test]
    fn test_accepts_is_threshold_and_all_filters() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Sink::new("s", Collect(Arc::clone(&lines)))
            .with_threshold(LogLevel::Warning)
            .with_filter(NameFilter::has_prefix("app"))
            .with_filter(NameFilter::lacks_prefix("app.noisy"));

        assert!(sink.accepts(&LogRecord::new("app.core", LogLevel::Error, "x")));
        assert!(!sink.accepts(&LogRecord::new("app.core", LogLevel::Info, "x")));
        assert!(!sink.accepts(&LogRecord::new("app.noisy.db", LogLevel::Error, "x")));
        assert!(!sink.accepts(&LogRecord::new("other", LogLevel::Critical, "x")));
    }

    #[test]
    fn test_write_uses_formatter() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Sink::new("s", Collect(Arc::clone(&lines))).with_formatter(Formatter::access());

        sink.write(&LogRecord::new("access", LogLevel::Info, "GET /health 200"))
            .unwrap();

        let lines = lines.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(" - GET /health 200"));
    }

    #[test]
    fn test_defaults() {
        let sink = Sink::new("s", Collect(Arc::new(Mutex::new(Vec::new()))));
        assert_eq!(sink.threshold(), LogLevel::Debug);
        assert!(sink.filters().is_empty());
        assert_eq!(sink.formatter(), &Formatter::standard());
    }
}
