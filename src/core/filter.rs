//! Record filters attached to sinks

use super::log_record::LogRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicate over a record's logger name.
///
/// Kept as plain data rather than a closure so a configured sink can be
/// inspected and compared.
///
/// # Examples
///
/// ```
/// use rust_log_router::core::{LogLevel, LogRecord, NameFilter};
///
/// let only_access = NameFilter::has_prefix("access");
/// let record = LogRecord::new("access.http", LogLevel::Info, "GET /");
/// assert!(only_access.accepts(&record));
/// assert!(!NameFilter::lacks_prefix("access").accepts(&record));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameFilter {
    /// Accepts names starting with `prefix`, or those that don't when `negate` is set
    PrefixMatch { prefix: String, negate: bool },
}

impl NameFilter {
    pub fn has_prefix(prefix: impl Into<String>) -> Self {
        NameFilter::PrefixMatch {
            prefix: prefix.into(),
            negate: false,
        }
    }

    pub fn lacks_prefix(prefix: impl Into<String>) -> Self {
        NameFilter::PrefixMatch {
            prefix: prefix.into(),
            negate: true,
        }
    }

    #[inline]
    pub fn accepts(&self, record: &LogRecord) -> bool {
        self.accepts_name(record.logger())
    }

    pub fn accepts_name(&self, name: &str) -> bool {
        match self {
            NameFilter::PrefixMatch { prefix, negate } => {
                name.starts_with(prefix.as_str()) != *negate
            }
        }
    }
}

impl fmt::Display for NameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameFilter::PrefixMatch { prefix, negate: false } => {
                write!(f, "name starts with '{}'", prefix)
            }
            NameFilter::PrefixMatch { prefix, negate: true } => {
                write!(f, "name does not start with '{}'", prefix)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_plain_string_prefix() {
        let filter = NameFilter::has_prefix("access");
        assert!(filter.accepts_name("access"));
        assert!(filter.accepts_name("access.http"));
        // No dot boundary: "accessibility" still starts with "access"
        assert!(filter.accepts_name("accessibility"));
        assert!(!filter.accepts_name("app.access"));
        assert!(!filter.accepts_name(""));
    }

    #[test]
    fn test_negated_prefix() {
        let filter = NameFilter::lacks_prefix("access");
        assert!(!filter.accepts_name("access.http"));
        assert!(filter.accepts_name("deployer"));
        assert!(filter.accepts_name(""));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            NameFilter::lacks_prefix("access").to_string(),
            "name does not start with 'access'"
        );
    }
}
