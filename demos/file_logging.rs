//! File logging example
//!
//! Demonstrates logging to the console, a rotating file and an error-only
//! file at the same time, then lowering the threshold at runtime.
//!
//! Run with: cargo run --example file_logging

use rust_log_facade::prelude::*;
use rust_log_facade::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Log Facade - File Logging Example ===\n");

    let log = Facade::new();

    Config::new()
        .with_level("info")
        .with_file(
            RotatingFileConfig::new("logs/application.log")
                .with_max_size(10 * 1024 * 1024)
                .with_max_backups(5)
                .with_max_age_days(14)
                .with_compression(true),
        )
        .with_error_file(true)
        .build(&log)?;

    println!("1. Logging to console, application.log and application-error.log:");

    log.info("Application started");
    log.debug("Loading configuration...");
    log.info("Configuration loaded successfully");
    log.warn("Using default settings for some options");
    log.with("host", "db.internal").with("port", 5432).info("Database connection established");
    log.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");

    let worker = log.with("worker", "importer");
    for i in 1..=5 {
        info!(worker, "Processing item {}/5", i);
        if i == 3 {
            warn!(worker, "Item {} took longer than expected", i);
        }
    }

    println!("\n3. Lowering the threshold to debug:");

    log.set_level_from_text("debug")?;
    log.debug("Debug records are now written");

    log.info("All operations completed");

    log.sync()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'logs/application.log' and 'logs/application-error.log'");

    Ok(())
}
