//! Sink trait for output destinations

use super::error::Result;

/// A destination for formatted log lines.
///
/// Each call to `write` receives one complete line including its trailing
/// newline. Implement this to route output somewhere the built-in console and
/// custom streams do not reach.
pub trait StreamSink: Send {
    fn write(&mut self, text: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
