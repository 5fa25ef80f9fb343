//! Scoped task timing
//!
//! A [`TaskScope`] names a task and the logger it belongs to. Entering it
//! starts the task and yields a [`TaskGuard`]; the task completes when the
//! guard is completed explicitly or dropped, including during a panic unwind.

use super::{
    error::{Result, TaskLoggerError},
    logger::TaskLogger,
    registry::{default_registry, LoggerRegistry},
};

enum ScopeTarget<'r> {
    Logger(TaskLogger),
    /// Looked up (or created) on entry
    Named {
        logger: String,
        registry: &'r LoggerRegistry,
    },
}

pub struct TaskScope<'r> {
    task: String,
    target: ScopeTarget<'r>,
}

impl TaskScope<'static> {
    pub fn new(task: impl Into<String>, logger: TaskLogger) -> Self {
        Self {
            task: task.into(),
            target: ScopeTarget::Logger(logger),
        }
    }

    /// Scope on the logger called `logger` in the default registry
    pub fn named(task: impl Into<String>, logger: impl Into<String>) -> Self {
        Self::in_registry(task, logger, default_registry())
    }
}

impl<'r> TaskScope<'r> {
    pub fn in_registry(
        task: impl Into<String>,
        logger: impl Into<String>,
        registry: &'r LoggerRegistry,
    ) -> Self {
        Self {
            task: task.into(),
            target: ScopeTarget::Named {
                logger: logger.into(),
                registry,
            },
        }
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    /// Start the task and return the guard that completes it
    pub fn enter(self) -> Result<TaskGuard> {
        let logger = match self.target {
            ScopeTarget::Logger(logger) => logger,
            ScopeTarget::Named { logger, registry } => registry.get_or_default(&logger)?,
        };
        logger.start_task(&self.task)?;
        Ok(TaskGuard {
            logger,
            task: self.task,
            completed: false,
        })
    }

    /// Run `f` inside the task. Whatever `f` returns is passed through
    /// untouched once the task has completed.
    pub fn run<T, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        let guard = self.enter()?;
        let value = f();
        guard.complete()?;
        Ok(value)
    }

    /// Like [`TaskScope::run`] for fallible bodies, flattening the logger's
    /// own errors into the caller's error type.
    pub fn try_run<T, E, F>(self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: From<TaskLoggerError>,
    {
        let guard = self.enter()?;
        let value = f();
        guard.complete()?;
        value
    }
}

/// Completes its task when dropped
#[must_use = "the task completes as soon as the guard is dropped"]
pub struct TaskGuard {
    logger: TaskLogger,
    task: String,
    completed: bool,
}

impl TaskGuard {
    pub fn logger(&self) -> &TaskLogger {
        &self.logger
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    /// Complete now and report the runtime or any write failure
    pub fn complete(mut self) -> Result<Option<f64>> {
        self.completed = true;
        self.logger.complete_task(&self.task)
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        if let Err(e) = self.logger.complete_task(&self.task) {
            eprintln!(
                "[TASKLOGGER ERROR] Failed to complete task '{}' on {}: {}",
                self.task,
                self.logger.name(),
                e
            );
        }
    }
}
