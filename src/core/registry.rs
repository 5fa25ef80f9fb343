//! Named logger registry

use super::{
    error::{Result, TaskLoggerError},
    logger::{TaskLogger, TaskLoggerBuilder},
};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref DEFAULT_REGISTRY: LoggerRegistry = LoggerRegistry::new();
}

/// The process-wide registry used by the free functions and `build()`
pub fn default_registry() -> &'static LoggerRegistry {
    &DEFAULT_REGISTRY
}

/// What happens when a logger is requested under a name already in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Fail with `DuplicateLogger`
    #[default]
    Error,
    /// Hand back the existing logger; the new settings are discarded
    Ignore,
    /// Register a fresh logger as `{name}_1`, `{name}_2`, ...
    Increment,
}

impl CollisionPolicy {
    pub fn to_str(&self) -> &'static str {
        match self {
            CollisionPolicy::Error => "error",
            CollisionPolicy::Ignore => "ignore",
            CollisionPolicy::Increment => "increment",
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for CollisionPolicy {
    type Err = TaskLoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "error" => Ok(CollisionPolicy::Error),
            "ignore" => Ok(CollisionPolicy::Ignore),
            "increment" => Ok(CollisionPolicy::Increment),
            other => Err(TaskLoggerError::InvalidCollisionPolicy(other.to_string())),
        }
    }
}

/// Maps names to loggers. Entries are only removed when a new logger fails
/// its first write.
///
/// Tests can create their own registry to stay clear of names used
/// elsewhere in the process.
#[derive(Default)]
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, TaskLogger>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a logger built from `builder`, resolving name collisions with
    /// the builder's policy. Nothing is registered if construction fails.
    ///
    /// The new logger's first write (its level announcement) happens after
    /// the registry lock is released, so a stream may look up loggers in
    /// this registry.
    pub fn get_or_create(&self, builder: TaskLoggerBuilder) -> Result<TaskLogger> {
        let logger = {
            let mut loggers = self.loggers.lock();
            let requested = builder.requested_name().to_string();

            let name = match loggers.get(&requested) {
                None => requested,
                Some(existing) => match builder.collision_policy() {
                    CollisionPolicy::Error => return Err(TaskLoggerError::duplicate(requested)),
                    CollisionPolicy::Ignore => return Ok(existing.clone()),
                    CollisionPolicy::Increment => next_free_name(&loggers, &requested),
                },
            };

            let logger = builder.build_unregistered(name.clone())?;
            loggers.insert(name, logger.clone());
            logger
        };

        if let Err(e) = logger.announce_level() {
            self.unregister(&logger);
            return Err(e);
        }
        Ok(logger)
    }

    fn unregister(&self, logger: &TaskLogger) {
        let mut loggers = self.loggers.lock();
        if loggers
            .get(logger.name())
            .is_some_and(|registered| registered.same_logger(logger))
        {
            loggers.remove(logger.name());
        }
    }

    /// The logger named `name`, created with defaults if missing
    pub fn get_or_default(&self, name: &str) -> Result<TaskLogger> {
        if let Some(logger) = self.get(name) {
            return Ok(logger);
        }
        TaskLogger::builder()
            .name(name)
            .if_exists(CollisionPolicy::Ignore)
            .build_in(self)
    }

    pub fn get(&self, name: &str) -> Option<TaskLogger> {
        self.loggers.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.lock().contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.names())
            .finish()
    }
}

fn next_free_name(loggers: &HashMap<String, TaskLogger>, base: &str) -> String {
    let mut suffix = 1usize;
    loop {
        let candidate = format!("{}_{}", base, suffix);
        if !loggers.contains_key(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
