//! Logging macros for ergonomic log message formatting.
//!
//! These macros forward `format!` arguments to a [`TaskLogger`](crate::TaskLogger)
//! and evaluate to the logger's `Result`, so they can be followed by `?`.
//!
//! # Examples
//!
//! ```
//! use tasklogger::prelude::*;
//! use tasklogger::info;
//!
//! let registry = LoggerRegistry::new();
//! let output = StringSink::new();
//! let logger = TaskLogger::builder()
//!     .name("macros")
//!     .stream(output.clone())
//!     .build_in(&registry)
//!     .unwrap();
//!
//! let rows = 120;
//! info!(logger, "Loaded {} rows", rows).unwrap();
//! assert_eq!(output.lines(), vec!["Loaded 120 rows"]);
//! ```

/// Log a message at an explicit severity.
///
/// ```
/// # use tasklogger::prelude::*;
/// # let logger = TaskLogger::builder().name("log-macro").stream(StringSink::new())
/// #     .build_in(&LoggerRegistry::new()).unwrap();
/// use tasklogger::log;
/// log!(logger, Severity::Warning, "Retry {} of {}", 2, 5).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// ```
/// # use tasklogger::prelude::*;
/// # let logger = TaskLogger::builder().name("critical-macro").stream(StringSink::new())
/// #     .build_in(&LoggerRegistry::new()).unwrap();
/// use tasklogger::critical;
/// critical!(logger, "Unable to recover: {}", "disk full").unwrap();
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Critical, $($arg)+)
    };
}
