//! Core logger types and traits

pub mod config;
pub mod error;
pub mod level;
pub mod logger;
pub mod registry;
pub mod scope;
pub mod sink;
pub mod timer;

pub use config::LoggerConfig;
pub use error::{MissingCapability, Result, TaskLoggerError};
pub use level::{should_emit, LevelSpec, Severity};
pub use logger::{
    TaskLogger, TaskLoggerBuilder, DEFAULT_INDENT, DEFAULT_LOGGER_NAME, DEFAULT_MIN_RUNTIME,
};
pub use registry::{default_registry, CollisionPolicy, LoggerRegistry};
pub use scope::{TaskGuard, TaskScope};
pub use sink::StreamSink;
pub use timer::{Timer, TimerKind, TimerSpec};
