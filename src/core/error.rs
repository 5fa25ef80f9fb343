//! Error types for the task logger

use std::fmt;

pub type Result<T> = std::result::Result<T, TaskLoggerError>;

/// Capability a custom stream failed to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCapability {
    Write,
    Flush,
    WriteAndFlush,
}

impl fmt::Display for MissingCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingCapability::Write => write!(f, "write"),
            MissingCapability::Flush => write!(f, "flush"),
            MissingCapability::WriteAndFlush => write!(f, "write and flush"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TaskLoggerError {
    /// Stream selected by an unknown name
    #[error("Invalid stream '{0}'. Expected \"stdout\" or \"stderr\"")]
    InvalidStreamName(String),

    /// Custom stream without the required operations
    #[error("Invalid stream: custom stream does not provide {missing}")]
    InvalidStreamCapability { missing: MissingCapability },

    /// Name collision under the `error` policy
    #[error(
        "TaskLogger {name} already exists. Please set `name` to be unique or set \
         `if_exists` to \"ignore\" or \"increment\""
    )]
    DuplicateLogger { name: String },

    #[error("Expected timer to be 'wall', 'cpu', or a callable. Got {0}")]
    InvalidTimer(String),

    /// Timer exists but this platform cannot provide it
    #[error("Timer '{timer}' is not supported on this platform: {reason}")]
    UnsupportedTimer { timer: String, reason: String },

    #[error("Invalid logging level: '{0}'")]
    InvalidLevel(String),

    #[error("Expected `if_exists` in \"error\", \"ignore\", \"increment\". Got {0}")]
    InvalidCollisionPolicy(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {source}")]
    IoOperation {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TaskLoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(operation: impl Into<String>, source: std::io::Error) -> Self {
        TaskLoggerError::IoOperation {
            operation: operation.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        TaskLoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn duplicate(name: impl Into<String>) -> Self {
        TaskLoggerError::DuplicateLogger { name: name.into() }
    }

    pub fn unsupported_timer(timer: impl Into<String>, reason: impl Into<String>) -> Self {
        TaskLoggerError::UnsupportedTimer {
            timer: timer.into(),
            reason: reason.into(),
        }
    }

    /// True for both ways a stream selector can be rejected
    pub fn is_invalid_stream(&self) -> bool {
        matches!(
            self,
            TaskLoggerError::InvalidStreamName(_) | TaskLoggerError::InvalidStreamCapability { .. }
        )
    }
}
