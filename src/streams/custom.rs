//! Caller-supplied destinations

use crate::core::{MissingCapability, Result, StreamSink, TaskLoggerError};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

type WriteFn = Box<dyn FnMut(&str) -> io::Result<()> + Send>;
type FlushFn = Box<dyn FnMut() -> io::Result<()> + Send>;

/// A destination assembled from a write operation and a flush operation.
///
/// Both must be present before the stream can back a logger; the check
/// happens when the [`OutputStream`](super::OutputStream) is built.
///
/// # Example
///
/// ```
/// use tasklogger::streams::CustomStream;
///
/// let stream = CustomStream::new()
///     .on_write(|text| {
///         eprint!("{}", text);
///         Ok(())
///     })
///     .on_flush(|| Ok(()));
/// assert!(stream.missing_capability().is_none());
/// ```
pub struct CustomStream {
    name: String,
    write: Option<WriteFn>,
    flush: Option<FlushFn>,
}

impl CustomStream {
    pub fn new() -> Self {
        Self {
            name: "custom".to_string(),
            write: None,
            flush: None,
        }
    }

    /// Adapt any `io::Write`; both capabilities come from the writer
    pub fn from_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let shared = Arc::new(Mutex::new(writer));
        let flush_handle = Arc::clone(&shared);
        Self::new()
            .on_write(move |text| shared.lock().write_all(text.as_bytes()))
            .on_flush(move || flush_handle.lock().flush())
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn on_write<F>(mut self, f: F) -> Self
    where
        F: FnMut(&str) -> io::Result<()> + Send + 'static,
    {
        self.write = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_flush<F>(mut self, f: F) -> Self
    where
        F: FnMut() -> io::Result<()> + Send + 'static,
    {
        self.flush = Some(Box::new(f));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn missing_capability(&self) -> Option<MissingCapability> {
        match (self.write.is_some(), self.flush.is_some()) {
            (true, true) => None,
            (false, true) => Some(MissingCapability::Write),
            (true, false) => Some(MissingCapability::Flush),
            (false, false) => Some(MissingCapability::WriteAndFlush),
        }
    }

    pub(crate) fn into_sink(self) -> Result<CustomSink> {
        match (self.write, self.flush) {
            (Some(write), Some(flush)) => Ok(CustomSink {
                name: self.name,
                write,
                flush,
            }),
            (write, flush) => Err(TaskLoggerError::InvalidStreamCapability {
                missing: match (write.is_some(), flush.is_some()) {
                    (false, true) => MissingCapability::Write,
                    (true, false) => MissingCapability::Flush,
                    _ => MissingCapability::WriteAndFlush,
                },
            }),
        }
    }
}

impl Default for CustomStream {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CustomStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomStream")
            .field("name", &self.name)
            .field("write", &self.write.is_some())
            .field("flush", &self.flush.is_some())
            .finish()
    }
}

pub(crate) struct CustomSink {
    name: String,
    write: WriteFn,
    flush: FlushFn,
}

impl StreamSink for CustomSink {
    fn write(&mut self, text: &str) -> Result<()> {
        (self.write)(text)
            .map_err(|e| TaskLoggerError::io_operation(format!("writing to {}", self.name), e))
    }

    fn flush(&mut self) -> Result<()> {
        (self.flush)()
            .map_err(|e| TaskLoggerError::io_operation(format!("flushing {}", self.name), e))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// In-memory destination that keeps everything written to it.
///
/// Clones share the same buffer, so keep one clone to inspect output after
/// handing the other to a logger.
#[derive(Clone, Default)]
pub struct StringSink {
    output: Arc<Mutex<String>>,
}

impl StringSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.output.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.output.lock().lines().map(String::from).collect()
    }

    pub fn clear(&self) {
        self.output.lock().clear();
    }
}

impl fmt::Display for StringSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.output.lock())
    }
}

impl From<StringSink> for CustomStream {
    fn from(sink: StringSink) -> Self {
        let output = sink.output;
        CustomStream::new()
            .with_name("string")
            .on_write(move |text| {
                output.lock().push_str(text);
                Ok(())
            })
            .on_flush(|| Ok(()))
    }
}
