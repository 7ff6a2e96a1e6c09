//! Routing example
//!
//! Configures the process-wide router once, then logs from a few named
//! loggers to show how records fan out to the console and the three
//! rotating files.
//!
//! Run with: cargo run --example routing_demo

use rust_log_router::prelude::*;
use rust_log_router::{critical, info, warn};
use std::thread;

fn main() -> Result<()> {
    println!("=== Rust Log Router - Routing Example ===\n");

    let config = LogConfig::new()
        .with_log_dir("demo_logs")
        .with_max_bytes(64 * 1024)
        .with_logger_level("deployer", LogLevel::Debug)
        .with_suppressed(["httpx", "urllib3.connectionpool"]);
    let system = init(config)?;

    println!("1. Application loggers (console + application.log):");
    let deployer = get_logger("deployer");
    deployer.debug("Resolving manifest (application.log only)");
    info!(deployer, "Deploying build {}", 42);
    warn!(deployer, "Replica {} slow to become ready", 3);

    println!("\n2. Access logger (access.log only):");
    let access = get_logger("access.http");
    access.info("GET /health 200 1ms");
    access.info("POST /deploy 202 15ms");

    println!("\n3. Errors from any logger also land in errors.log:");
    let orchestrator = get_logger("orchestrator");
    orchestrator.error("Node pool exhausted");
    critical!(access, "Upstream unavailable for {}s", 30);

    println!("\n4. Suppressed third-party logger:");
    let httpx = get_logger("httpx");
    httpx.info("HTTP Request: GET https://example.invalid (hidden)");
    httpx.warning("Retrying request (shown)");

    println!("\n5. Logging from worker threads:");
    let workers: Vec<_> = (0..4)
        .map(|id| {
            thread::spawn(move || {
                let logger = get_logger("orchestrator.worker");
                for step in 1..=3 {
                    info!(logger, "Worker {} finished step {}/3", id, step);
                }
            })
        })
        .collect();
    for worker in workers {
        let _ = worker.join();
    }

    system.flush()?;

    let metrics = system.router().metrics();
    println!(
        "\nRouted {} records, {} sink writes, {} failures",
        metrics.routed(),
        metrics.delivered(),
        metrics.sink_failures()
    );
    println!("\n=== Example completed successfully! ===");
    println!("Check 'demo_logs/' for application.log, access.log and errors.log");

    Ok(())
}
