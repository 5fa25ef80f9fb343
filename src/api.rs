//! Free functions over the default registry
//!
//! Each function looks up the logger called `logger`, creating it with
//! default settings on first use, and returns the handle so calls can be
//! chained. Pass [`DEFAULT_LOGGER_NAME`](crate::DEFAULT_LOGGER_NAME) to share the
//! process-wide logger.
//!
//! ```no_run
//! use tasklogger::{log_complete, log_info, log_start, DEFAULT_LOGGER_NAME};
//!
//! log_start("training", DEFAULT_LOGGER_NAME)?;
//! log_info("epoch 1", DEFAULT_LOGGER_NAME)?;
//! log_complete("training", DEFAULT_LOGGER_NAME)?;
//! # Ok::<(), tasklogger::TaskLoggerError>(())
//! ```

use crate::core::{
    default_registry, LevelSpec, Result, Severity, TaskLogger, TaskScope, TimerSpec,
};

/// The logger registered as `name`, created with defaults if missing
pub fn get_logger(name: &str) -> Result<TaskLogger> {
    default_registry().get_or_default(name)
}

pub fn log_start(task: &str, logger: &str) -> Result<TaskLogger> {
    let logger = get_logger(logger)?;
    logger.start_task(task)?;
    Ok(logger)
}

/// Complete `task` and return its runtime in seconds, or `None` if it was
/// not running
pub fn log_complete(task: &str, logger: &str) -> Result<Option<f64>> {
    get_logger(logger)?.complete_task(task)
}

/// A scope timing `task`; the logger is resolved when the scope is entered
pub fn log_task(task: impl Into<String>, logger: impl Into<String>) -> TaskScope<'static> {
    TaskScope::named(task, logger)
}

fn log_at(severity: Severity, message: &str, logger: &str) -> Result<TaskLogger> {
    let logger = get_logger(logger)?;
    logger.log(severity, message)?;
    Ok(logger)
}

pub fn log_debug(message: &str, logger: &str) -> Result<TaskLogger> {
    log_at(Severity::Debug, message, logger)
}

pub fn log_info(message: &str, logger: &str) -> Result<TaskLogger> {
    log_at(Severity::Info, message, logger)
}

pub fn log_warning(message: &str, logger: &str) -> Result<TaskLogger> {
    log_at(Severity::Warning, message, logger)
}

pub fn log_error(message: &str, logger: &str) -> Result<TaskLogger> {
    log_at(Severity::Error, message, logger)
}

pub fn log_critical(message: &str, logger: &str) -> Result<TaskLogger> {
    log_at(Severity::Critical, message, logger)
}

pub fn set_level(level: impl Into<LevelSpec>, logger: &str) -> Result<TaskLogger> {
    let logger = get_logger(logger)?;
    logger.set_level(level)?;
    Ok(logger)
}

pub fn set_timer(timer: impl Into<TimerSpec>, logger: &str) -> Result<TaskLogger> {
    let logger = get_logger(logger)?;
    logger.set_timer(timer)?;
    Ok(logger)
}

pub fn set_indent(indent: usize, logger: &str) -> Result<TaskLogger> {
    let logger = get_logger(logger)?;
    logger.set_indent(indent);
    Ok(logger)
}
