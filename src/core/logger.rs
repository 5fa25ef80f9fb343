//! Task logger implementation

use super::{
    error::Result,
    level::{LevelSpec, Severity},
    registry::{default_registry, CollisionPolicy, LoggerRegistry},
    scope::TaskScope,
    timer::{Timer, TimerKind, TimerSpec},
};
use crate::streams::{HostEnvironment, OutputStream, ProcessHost, StreamSpec};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_LOGGER_NAME: &str = "TaskLogger";
pub const DEFAULT_INDENT: usize = 2;
/// Completions faster than this are not reported
pub const DEFAULT_MIN_RUNTIME: Duration = Duration::from_millis(10);

/// Times named tasks and writes indented, leveled log lines.
///
/// `TaskLogger` is a handle: clones refer to the same logger, and the
/// registry hands out clones of the instance it owns. Each emitted line is
/// indented by `indent` spaces per task currently running.
///
/// # Example
///
/// ```
/// use tasklogger::{LoggerRegistry, StringSink, TaskLogger};
///
/// let registry = LoggerRegistry::new();
/// let output = StringSink::new();
/// let logger = TaskLogger::builder()
///     .name("docs")
///     .stream(output.clone())
///     .min_runtime(std::time::Duration::ZERO)
///     .build_in(&registry)
///     .unwrap();
///
/// logger.start_task("load").unwrap();
/// logger.log_info("reading input").unwrap();
/// logger.complete_task("load").unwrap();
///
/// let lines = output.lines();
/// assert_eq!(lines[0], "Calculating load...");
/// assert_eq!(lines[1], "  reading input");
/// assert!(lines[2].starts_with("Calculated load in "));
/// ```
#[derive(Clone)]
pub struct TaskLogger(Arc<TaskLoggerInner>);

struct TaskLoggerInner {
    name: String,
    state: Mutex<LoggerState>,
    output: Mutex<OutputStream>,
}

struct LoggerState {
    threshold: Severity,
    indent: usize,
    min_runtime: Duration,
    timer: Timer,
    tasks: HashMap<String, RunningTask>,
}

/// A started task remembers the timer that stamped it
struct RunningTask {
    started_at: f64,
    timer: Timer,
}

impl TaskLogger {
    /// Create a builder for TaskLogger
    #[must_use]
    pub fn builder() -> TaskLoggerBuilder {
        TaskLoggerBuilder::new()
    }

    /// Create a logger with default settings in the default registry
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::builder().name(name).build()
    }

    /// Construct without writing anything; see [`TaskLogger::announce_level`]
    fn from_parts(name: String, builder: TaskLoggerBuilder) -> Result<Self> {
        let threshold = builder.level.resolve()?;
        let timer = Timer::resolve(builder.timer)?;
        let host = builder.host.unwrap_or_else(|| Arc::new(ProcessHost));
        let output = OutputStream::with_host(builder.stream, host)?;

        Ok(TaskLogger(Arc::new(TaskLoggerInner {
            name,
            state: Mutex::new(LoggerState {
                threshold,
                indent: builder.indent,
                min_runtime: builder.min_runtime,
                timer,
                tasks: HashMap::new(),
            }),
            output: Mutex::new(output),
        })))
    }

    /// Emit the "Set {name} logging to {LEVEL}" line for the current level.
    /// Called once a new logger is registered.
    pub(crate) fn announce_level(&self) -> Result<()> {
        let level = self.level();
        self.emit(
            Severity::Debug,
            &format!("Set {} logging to {}", self.0.name, level),
        )
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn level(&self) -> Severity {
        self.0.state.lock().threshold
    }

    pub fn indent(&self) -> usize {
        self.0.state.lock().indent
    }

    pub fn min_runtime(&self) -> Duration {
        self.0.state.lock().min_runtime
    }

    pub fn timer_kind(&self) -> TimerKind {
        self.0.state.lock().timer.kind()
    }

    /// Number of tasks started and not yet completed
    pub fn depth(&self) -> usize {
        self.0.state.lock().tasks.len()
    }

    pub fn is_running(&self, task: &str) -> bool {
        self.0.state.lock().tasks.contains_key(task)
    }

    /// Names of the running tasks, sorted
    pub fn running_tasks(&self) -> Vec<String> {
        let mut tasks: Vec<String> = self.0.state.lock().tasks.keys().cloned().collect();
        tasks.sort();
        tasks
    }

    /// True when both handles refer to the same logger
    pub fn same_logger(&self, other: &TaskLogger) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Set the severity threshold.
    ///
    /// Accepts a bool, an integer or a [`Severity`]. A change is announced
    /// with a DEBUG line filtered by the new threshold; setting the current
    /// threshold again does nothing. If the announcement cannot be written the
    /// previous threshold is restored and the write error returned.
    pub fn set_level(&self, level: impl Into<LevelSpec>) -> Result<&Self> {
        let severity = level.into().resolve()?;
        self.apply_level(severity)?;
        Ok(self)
    }

    fn apply_level(&self, severity: Severity) -> Result<()> {
        let previous = {
            let mut state = self.0.state.lock();
            if state.threshold == severity {
                return Ok(());
            }
            std::mem::replace(&mut state.threshold, severity)
        };
        if let Err(e) = self.announce_level() {
            self.0.state.lock().threshold = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Set the timer used for tasks started from now on
    pub fn set_timer(&self, timer: impl Into<TimerSpec>) -> Result<&Self> {
        let timer = Timer::resolve(timer.into())?;
        self.0.state.lock().timer = timer;
        Ok(self)
    }

    /// Set the number of spaces added per running task
    pub fn set_indent(&self, indent: usize) -> &Self {
        self.0.state.lock().indent = indent;
        self
    }

    pub fn set_min_runtime(&self, min_runtime: Duration) -> &Self {
        self.0.state.lock().min_runtime = min_runtime;
        self
    }

    /// Log `message` at `severity`, indented by the current depth
    pub fn log(&self, severity: Severity, message: impl AsRef<str>) -> Result<&Self> {
        self.emit(severity, message.as_ref())?;
        Ok(self)
    }

    #[inline]
    pub fn log_debug(&self, message: impl AsRef<str>) -> Result<&Self> {
        self.log(Severity::Debug, message)
    }

    #[inline]
    pub fn log_info(&self, message: impl AsRef<str>) -> Result<&Self> {
        self.log(Severity::Info, message)
    }

    #[inline]
    pub fn log_warning(&self, message: impl AsRef<str>) -> Result<&Self> {
        self.log(Severity::Warning, message)
    }

    #[inline]
    pub fn log_error(&self, message: impl AsRef<str>) -> Result<&Self> {
        self.log(Severity::Error, message)
    }

    #[inline]
    pub fn log_critical(&self, message: impl AsRef<str>) -> Result<&Self> {
        self.log(Severity::Critical, message)
    }

    /// Log "Calculating {task}..." and start the task's clock.
    ///
    /// Starting a task that is already running restarts its clock.
    pub fn start_task(&self, task: &str) -> Result<&Self> {
        self.emit(Severity::Info, &format!("Calculating {}...", task))?;

        let mut state = self.0.state.lock();
        let timer = state.timer.clone();
        let started_at = timer.now();
        state
            .tasks
            .insert(task.to_string(), RunningTask { started_at, timer });
        Ok(self)
    }

    /// Stop the task's clock and return the elapsed seconds.
    ///
    /// Runtimes below `min_runtime` are returned but not logged. Completing a
    /// task that is not running logs "Calculated {task}." and returns `None`.
    pub fn complete_task(&self, task: &str) -> Result<Option<f64>> {
        let (running, min_runtime) = {
            let mut state = self.0.state.lock();
            (state.tasks.remove(task), state.min_runtime)
        };

        match running {
            Some(running) => {
                let elapsed = running.timer.now() - running.started_at;
                if elapsed >= min_runtime.as_secs_f64() {
                    self.emit(
                        Severity::Info,
                        &format!("Calculated {} in {:.2} seconds.", task, elapsed),
                    )?;
                }
                Ok(Some(elapsed))
            }
            None => {
                self.emit(Severity::Info, &format!("Calculated {}.", task))?;
                Ok(None)
            }
        }
    }

    /// A scope that starts `task` on entry and completes it on exit
    pub fn task(&self, task: impl Into<String>) -> TaskScope<'static> {
        TaskScope::new(task, self.clone())
    }

    /// Run `f` as `task`; the task completes even if `f` panics
    pub fn with_task<T, F>(&self, task: impl Into<String>, f: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        self.task(task).run(f)
    }

    pub fn flush(&self) -> Result<()> {
        self.0.output.lock().flush()
    }

    fn emit(&self, severity: Severity, message: &str) -> Result<()> {
        let line = {
            let state = self.0.state.lock();
            if !severity.is_enabled_at(state.threshold) {
                return Ok(());
            }
            let mut line = " ".repeat(state.tasks.len() * state.indent);
            line.push_str(message);
            line.push('\n');
            line
        };

        let mut output = self.0.output.lock();
        output.write(&line)?;
        output.flush()
    }

    #[deprecated(since = "0.1.0", note = "Use log_debug() instead")]
    pub fn debug(&self, message: impl AsRef<str>) -> Result<&Self> {
        self.log_debug(message)
    }

    #[deprecated(since = "0.1.0", note = "Use log_info() instead")]
    pub fn info(&self, message: impl AsRef<str>) -> Result<&Self> {
        self.log_info(message)
    }

    #[deprecated(since = "0.1.0", note = "Use log_warning() instead")]
    pub fn warning(&self, message: impl AsRef<str>) -> Result<&Self> {
        self.log_warning(message)
    }

    #[deprecated(since = "0.1.0", note = "Use log_error() instead")]
    pub fn error(&self, message: impl AsRef<str>) -> Result<&Self> {
        self.log_error(message)
    }

    #[deprecated(since = "0.1.0", note = "Use log_critical() instead")]
    pub fn critical(&self, message: impl AsRef<str>) -> Result<&Self> {
        self.log_critical(message)
    }
}

impl fmt::Debug for TaskLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.state.lock();
        f.debug_struct("TaskLogger")
            .field("name", &self.0.name)
            .field("level", &state.threshold)
            .field("indent", &state.indent)
            .field("min_runtime", &state.min_runtime)
            .field("timer", &state.timer.kind())
            .field("running", &state.tasks.len())
            .finish()
    }
}

/// Builder for constructing TaskLogger with a fluent API
///
/// # Example
/// ```
/// use tasklogger::prelude::*;
///
/// let registry = LoggerRegistry::new();
/// let logger = TaskLogger::builder()
///     .name("pipeline")
///     .level(2)
///     .timer("cpu-or-wall")
///     .stream("stderr")
///     .indent(4)
///     .if_exists(CollisionPolicy::Increment)
///     .build_in(&registry)
///     .unwrap();
/// assert_eq!(logger.level(), Severity::Debug);
/// ```
pub struct TaskLoggerBuilder {
    name: String,
    level: LevelSpec,
    timer: TimerSpec,
    stream: StreamSpec,
    min_runtime: Duration,
    indent: usize,
    if_exists: CollisionPolicy,
    host: Option<Arc<dyn HostEnvironment>>,
}

impl TaskLoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            level: LevelSpec::default(),
            timer: TimerSpec::default(),
            stream: StreamSpec::default(),
            min_runtime: DEFAULT_MIN_RUNTIME,
            indent: DEFAULT_INDENT,
            if_exists: CollisionPolicy::default(),
            host: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<LevelSpec>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timer(mut self, timer: impl Into<TimerSpec>) -> Self {
        self.timer = timer.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stream(mut self, stream: impl Into<StreamSpec>) -> Self {
        self.stream = stream.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_runtime(mut self, min_runtime: Duration) -> Self {
        self.min_runtime = min_runtime;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// What to do when the name is already registered
    #[must_use = "builder methods return a new value"]
    pub fn if_exists(mut self, policy: CollisionPolicy) -> Self {
        self.if_exists = policy;
        self
    }

    /// Replace notebook and console detection, mostly for tests and embedders
    #[must_use = "builder methods return a new value"]
    pub fn host(mut self, host: Arc<dyn HostEnvironment>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn requested_name(&self) -> &str {
        &self.name
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        self.if_exists
    }

    /// Build and register in the process-wide default registry
    pub fn build(self) -> Result<TaskLogger> {
        default_registry().get_or_create(self)
    }

    /// Build and register in `registry`
    pub fn build_in(self, registry: &LoggerRegistry) -> Result<TaskLogger> {
        registry.get_or_create(self)
    }

    /// Construct under `name` without registering anywhere
    pub(crate) fn build_unregistered(self, name: String) -> Result<TaskLogger> {
        TaskLogger::from_parts(name, self)
    }
}

impl Default for TaskLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskLoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskLoggerBuilder")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("timer", &self.timer)
            .field("stream", &self.stream)
            .field("min_runtime", &self.min_runtime)
            .field("indent", &self.indent)
            .field("if_exists", &self.if_exists)
            .finish()
    }
}
