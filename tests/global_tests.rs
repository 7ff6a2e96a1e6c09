//! The process-wide system. Kept in its own test binary since it owns
//! global state.

use rust_log_router::core::{ACCESS_LOG, APPLICATION_LOG};
use rust_log_router::{get_logger, get_logger_with_level, init, system, LogConfig, LogLevel, Logger};
use std::fs;
use std::sync::OnceLock;
use tempfile::TempDir;

static LOG_DIR: OnceLock<TempDir> = OnceLock::new();

fn log_dir() -> &'static TempDir {
    LOG_DIR.get_or_init(|| TempDir::new().expect("Failed to create temp dir"))
}

#[test]
fn test_init_then_get_logger() {
    let config = LogConfig::new()
        .with_log_dir(log_dir().path())
        .with_console(false)
        .with_suppressed(["noisy.client"]);
    let first = init(config).expect("Failed to init");
    // A second init is a no-op returning the same system
    let second = init(LogConfig::new().with_log_dir("/nonexistent/ignored")).unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first, system()));
    assert_eq!(system().config().log_dir, log_dir().path());

    let a = get_logger("deployer");
    let b = get_logger_with_level("deployer", LogLevel::Critical);
    assert!(Logger::ptr_eq(&a, &b));
    assert_eq!(b.level(), None);

    a.info("global deploy");
    get_logger("access.api").info("GET /status 200");
    get_logger("noisy.client").info("dropped");
    system().flush().unwrap();

    let application = fs::read_to_string(log_dir().path().join(APPLICATION_LOG)).unwrap();
    let access = fs::read_to_string(log_dir().path().join(ACCESS_LOG)).unwrap();
    assert!(application.contains("global deploy"));
    assert!(!application.contains("dropped"));
    assert!(access.ends_with("GET /status 200\n"));
}
