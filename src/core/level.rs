//! Severity levels and the policy deciding which messages are emitted

use super::error::{Result, TaskLoggerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message severity, ordered by verbosity.
///
/// `Ignore` is the quietest threshold (nothing is shown) and `Debug` the
/// loudest (everything is shown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    Ignore = 0,
    Critical = 1,
    Error = 2,
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
}

impl Severity {
    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Ignore => "IGNORE",
            Severity::Critical => "CRITICAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// Whether a message of this severity passes `threshold`
    #[inline]
    pub fn is_enabled_at(self, threshold: Severity) -> bool {
        should_emit(self, threshold)
    }
}

/// `Ignore` as a threshold silences everything; otherwise a message is
/// emitted when it is no more verbose than the threshold.
#[inline]
pub fn should_emit(message: Severity, threshold: Severity) -> bool {
    threshold != Severity::Ignore && message <= threshold
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = TaskLoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "IGNORE" => Ok(Severity::Ignore),
            "CRITICAL" | "FATAL" => Ok(Severity::Critical),
            "ERROR" => Ok(Severity::Error),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "INFO" => Ok(Severity::Info),
            "DEBUG" => Ok(Severity::Debug),
            _ => Err(TaskLoggerError::InvalidLevel(s.to_string())),
        }
    }
}

/// Caller-facing level value, resolved once into a [`Severity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    /// `true` shows INFO, `false` shows WARNING
    Bool(bool),
    /// 2+ DEBUG, 1 INFO, 0 WARNING, -1 ERROR, -2 CRITICAL, -3 or less IGNORE
    Int(i64),
    /// A severity name, or an integer written as text
    Named(String),
}

impl LevelSpec {
    pub fn resolve(&self) -> Result<Severity> {
        match self {
            LevelSpec::Bool(true) => Ok(Severity::Info),
            LevelSpec::Bool(false) => Ok(Severity::Warning),
            LevelSpec::Int(level) => Ok(resolve_int(*level)),
            LevelSpec::Named(name) => match name.trim().parse::<i64>() {
                Ok(level) => Ok(resolve_int(level)),
                Err(_) => name.parse(),
            },
        }
    }
}

fn resolve_int(level: i64) -> Severity {
    match level {
        l if l >= 2 => Severity::Debug,
        1 => Severity::Info,
        0 => Severity::Warning,
        -1 => Severity::Error,
        -2 => Severity::Critical,
        _ => Severity::Ignore,
    }
}

impl Default for LevelSpec {
    fn default() -> Self {
        LevelSpec::Int(1)
    }
}

impl From<bool> for LevelSpec {
    fn from(value: bool) -> Self {
        LevelSpec::Bool(value)
    }
}

macro_rules! level_from_int_types {
    ( $( $t:ty ),* ) => {
        $(
            impl From<$t> for LevelSpec {
                fn from(value: $t) -> Self {
                    LevelSpec::Int(value as i64)
                }
            }
        )*
    };
}

level_from_int_types!(i8, i16, i32, i64, isize, u8, u16, u32);

impl From<Severity> for LevelSpec {
    fn from(value: Severity) -> Self {
        LevelSpec::Named(value.to_str().to_string())
    }
}

impl From<&str> for LevelSpec {
    fn from(value: &str) -> Self {
        LevelSpec::Named(value.to_string())
    }
}

impl From<String> for LevelSpec {
    fn from(value: String) -> Self {
        LevelSpec::Named(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_boundaries() {
        let cases = [
            (i64::MIN, Severity::Ignore),
            (-3, Severity::Ignore),
            (-2, Severity::Critical),
            (-1, Severity::Error),
            (0, Severity::Warning),
            (1, Severity::Info),
            (2, Severity::Debug),
            (17, Severity::Debug),
        ];
        for (level, expected) in cases {
            assert_eq!(LevelSpec::from(level).resolve().unwrap(), expected, "level {}", level);
        }
    }

    #[test]
    fn test_bool_levels() {
        assert_eq!(LevelSpec::from(true).resolve().unwrap(), Severity::Info);
        assert_eq!(LevelSpec::from(false).resolve().unwrap(), Severity::Warning);
    }

    #[test]
    fn test_named_levels() {
        assert_eq!(LevelSpec::from("debug").resolve().unwrap(), Severity::Debug);
        assert_eq!(LevelSpec::from("Warn").resolve().unwrap(), Severity::Warning);
        assert_eq!(LevelSpec::from("fatal").resolve().unwrap(), Severity::Critical);
        assert_eq!(LevelSpec::from("-1").resolve().unwrap(), Severity::Error);
        assert_eq!(LevelSpec::from(Severity::Ignore).resolve().unwrap(), Severity::Ignore);

        let err = LevelSpec::from("loud").resolve().unwrap_err();
        assert!(matches!(err, TaskLoggerError::InvalidLevel(ref s) if s == "loud"));
    }

    #[test]
    fn test_should_emit() {
        assert!(should_emit(Severity::Debug, Severity::Debug));
        assert!(should_emit(Severity::Critical, Severity::Debug));
        assert!(should_emit(Severity::Warning, Severity::Info));
        assert!(!should_emit(Severity::Debug, Severity::Info));
        assert!(!should_emit(Severity::Info, Severity::Warning));
        assert!(should_emit(Severity::Critical, Severity::Critical));

        for message in [
            Severity::Critical,
            Severity::Error,
            Severity::Warning,
            Severity::Info,
            Severity::Debug,
        ] {
            assert!(!should_emit(message, Severity::Ignore));
        }
    }

    #[test]
    fn test_level_spec_deserialize() {
        let levels: Vec<LevelSpec> = serde_json::from_str(r#"[true, -2, "debug"]"#).unwrap();
        assert_eq!(
            levels,
            vec![
                LevelSpec::Bool(true),
                LevelSpec::Int(-2),
                LevelSpec::Named("debug".to_string())
            ]
        );
    }
}
