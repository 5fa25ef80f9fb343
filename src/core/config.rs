//! Serializable logger configuration
//!
//! Mirrors the builder options in a form that can be stored as JSON:
//!
//! ```json
//! {"name": "etl", "level": "debug", "timer": "cpu", "stream": "stderr",
//!  "min_runtime": 0.5, "indent": 4, "if_exists": "increment"}
//! ```
//!
//! Every field is optional. Values are checked when the config is turned into
//! a builder (`if_exists`, `min_runtime`) or when the logger is built
//! (`level`, `timer`, `stream`), and fail with the same errors as the
//! builder would.

use super::{
    error::{Result, TaskLoggerError},
    level::LevelSpec,
    logger::{TaskLogger, TaskLoggerBuilder, DEFAULT_INDENT, DEFAULT_LOGGER_NAME, DEFAULT_MIN_RUNTIME},
    registry::CollisionPolicy,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub name: String,
    pub level: LevelSpec,
    pub timer: String,
    pub stream: String,
    /// Seconds
    pub min_runtime: f64,
    pub indent: usize,
    pub if_exists: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            level: LevelSpec::default(),
            timer: "wall".to_string(),
            stream: "stdout".to_string(),
            min_runtime: DEFAULT_MIN_RUNTIME.as_secs_f64(),
            indent: DEFAULT_INDENT,
            if_exists: CollisionPolicy::default().to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn into_builder(self) -> Result<TaskLoggerBuilder> {
        let if_exists: CollisionPolicy = self.if_exists.parse()?;
        let min_runtime = Duration::try_from_secs_f64(self.min_runtime).map_err(|_| {
            TaskLoggerError::config(
                "min_runtime",
                format!("expected a non-negative number of seconds, got {}", self.min_runtime),
            )
        })?;

        Ok(TaskLogger::builder()
            .name(self.name)
            .level(self.level)
            .timer(self.timer)
            .stream(self.stream)
            .min_runtime(min_runtime)
            .indent(self.indent)
            .if_exists(if_exists))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoggerRegistry, Severity, TimerKind};

    #[test]
    fn test_defaults_match_builder() {
        let config = LoggerConfig::from_json("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());

        let builder = config.into_builder().unwrap();
        assert_eq!(builder.requested_name(), "TaskLogger");
        assert_eq!(builder.collision_policy(), CollisionPolicy::Error);
    }

    #[test]
    fn test_full_config() {
        let config = LoggerConfig::from_json(
            r#"{"name": "etl", "level": -1, "timer": "wall", "stream": "stderr",
                "min_runtime": 0.5, "indent": 4, "if_exists": "increment"}"#,
        )
        .unwrap();

        let registry = LoggerRegistry::new();
        let logger = config.into_builder().unwrap().build_in(&registry).unwrap();
        assert_eq!(logger.name(), "etl");
        assert_eq!(logger.level(), Severity::Error);
        assert_eq!(logger.timer_kind(), TimerKind::Wall);
        assert_eq!(logger.indent(), 4);
        assert_eq!(logger.min_runtime(), Duration::from_millis(500));
    }

    #[test]
    fn test_level_forms() {
        for (json, expected) in [
            (r#"{"level": true}"#, Severity::Info),
            (r#"{"level": 2}"#, Severity::Debug),
            (r#"{"level": "critical"}"#, Severity::Critical),
        ] {
            let config = LoggerConfig::from_json(json).unwrap();
            assert_eq!(config.level.resolve().unwrap(), expected, "{}", json);
        }
    }

    #[test]
    fn test_rejections() {
        let err = LoggerConfig::from_json(r#"{"colour": "red"}"#).unwrap_err();
        assert!(matches!(err, TaskLoggerError::JsonError(_)));

        let err = LoggerConfig::from_json(r#"{"if_exists": "overwrite"}"#)
            .unwrap()
            .into_builder()
            .unwrap_err();
        assert!(matches!(err, TaskLoggerError::InvalidCollisionPolicy(_)));

        let err = LoggerConfig::from_json(r#"{"min_runtime": -1.0}"#)
            .unwrap()
            .into_builder()
            .unwrap_err();
        assert!(matches!(err, TaskLoggerError::InvalidConfiguration { .. }));

        let registry = LoggerRegistry::new();
        let err = LoggerConfig::from_json(r#"{"stream": "printer"}"#)
            .unwrap()
            .into_builder()
            .unwrap()
            .build_in(&registry)
            .unwrap_err();
        assert!(err.is_invalid_stream());
    }

    #[test]
    fn test_json_roundtrip_keeps_names() {
        let json = LoggerConfig::default().to_json().unwrap();
        assert!(json.contains("\"if_exists\": \"error\""));
        assert!(json.contains("\"timer\": \"wall\""));
    }
}
