//! Basic task timing example
//!
//! Demonstrates nested task timing, level changes and scoped tasks on stdout.
//!
//! Run with: cargo run --example basic_usage

use std::thread;
use std::time::Duration;
use tasklogger::prelude::*;
use tasklogger::{info, warning};

fn main() -> Result<()> {
    println!("=== tasklogger - Basic Usage Example ===\n");

    let logger = TaskLogger::new("demo")?;

    println!("1. Nested tasks:");
    logger.start_task("pipeline")?;
    logger.start_task("load")?;
    thread::sleep(Duration::from_millis(120));
    logger.complete_task("load")?;
    let rows = logger.with_task("transform", || {
        thread::sleep(Duration::from_millis(60));
        1_024
    })?;
    info!(logger, "transformed {} rows", rows)?;
    logger.complete_task("pipeline")?;

    println!("\n2. Changing the level:");
    logger.set_level(2)?;
    logger.log_debug("debug output is now visible")?;
    logger.set_level(0)?;
    logger.log_info("hidden at WARNING")?;
    warning!(logger, "still visible at {}", logger.level())?;

    println!("\n3. Free functions on the default logger:");
    tasklogger::log_start("sleep", tasklogger::DEFAULT_LOGGER_NAME)?;
    thread::sleep(Duration::from_millis(30));
    tasklogger::log_complete("sleep", tasklogger::DEFAULT_LOGGER_NAME)?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
