//! # tasklogger
//!
//! Leveled console logging with timing for named tasks.
//!
//! ## Features
//!
//! - **Task timing**: `start_task`/`complete_task` pairs report elapsed wall
//!   or CPU time, with nested tasks indented under their parents
//! - **Severity filtering**: DEBUG through CRITICAL plus a silent level
//! - **Named loggers**: a registry with configurable name collision handling
//! - **Pluggable output**: stdout, stderr, any `std::io::Write`, or a capture
//!   buffer for tests
//!
//! ```
//! use tasklogger::prelude::*;
//!
//! let registry = LoggerRegistry::new();
//! let output = StringSink::new();
//! let logger = TaskLogger::builder()
//!     .name("pipeline")
//!     .stream(output.clone())
//!     .build_in(&registry)?;
//!
//! let rows = logger.with_task("load", || vec![1, 2, 3])?;
//! logger.log_info(format!("{} rows", rows.len()))?;
//!
//! assert_eq!(output.lines()[0], "Calculating load...");
//! # Ok::<(), TaskLoggerError>(())
//! ```

pub mod api;
pub mod core;
pub mod macros;
pub mod streams;

pub mod prelude {
    pub use crate::api::{get_logger, log_complete, log_start, log_task};
    pub use crate::core::{
        CollisionPolicy, LevelSpec, LoggerConfig, LoggerRegistry, Result, Severity, TaskGuard,
        TaskLogger, TaskLoggerBuilder, TaskLoggerError, TaskScope, TimerKind, TimerSpec,
    };
    pub use crate::streams::{CustomStream, StreamSpec, StringSink};
}

pub use api::{
    get_logger, log_complete, log_critical, log_debug, log_error, log_info, log_start, log_task,
    log_warning, set_indent, set_level, set_timer,
};
pub use core::{
    default_registry, should_emit, CollisionPolicy, LevelSpec, LoggerConfig, LoggerRegistry,
    MissingCapability, Result, Severity, StreamSink, TaskGuard, TaskLogger, TaskLoggerBuilder,
    TaskLoggerError, TaskScope, Timer, TimerKind, TimerSpec, DEFAULT_INDENT, DEFAULT_LOGGER_NAME,
    DEFAULT_MIN_RUNTIME,
};
pub use streams::{
    ConsoleTarget, CustomStream, HostEnvironment, OutputStream, StreamSpec, StringSink,
};
