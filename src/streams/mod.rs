//! Output streams for log lines

pub mod console;
pub mod custom;

pub use console::{ConsoleSink, ConsoleTarget, HostEnvironment, ProcessHost};
pub use custom::{CustomStream, StringSink};

use crate::core::{Result, StreamSink};
use std::fmt;
use std::sync::Arc;

/// Destination selector accepted when a logger is configured
#[derive(Default)]
pub enum StreamSpec {
    #[default]
    Stdout,
    Stderr,
    /// `"stdout"` or `"stderr"`
    Named(String),
    Custom(CustomStream),
    Sink(Box<dyn StreamSink>),
}

impl fmt::Debug for StreamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamSpec::Stdout => write!(f, "Stdout"),
            StreamSpec::Stderr => write!(f, "Stderr"),
            StreamSpec::Named(name) => f.debug_tuple("Named").field(name).finish(),
            StreamSpec::Custom(custom) => f.debug_tuple("Custom").field(custom).finish(),
            StreamSpec::Sink(sink) => f.debug_tuple("Sink").field(&sink.name()).finish(),
        }
    }
}

impl From<&str> for StreamSpec {
    fn from(name: &str) -> Self {
        StreamSpec::Named(name.to_string())
    }
}

impl From<String> for StreamSpec {
    fn from(name: String) -> Self {
        StreamSpec::Named(name)
    }
}

impl From<ConsoleTarget> for StreamSpec {
    fn from(target: ConsoleTarget) -> Self {
        match target {
            ConsoleTarget::Stdout => StreamSpec::Stdout,
            ConsoleTarget::Stderr => StreamSpec::Stderr,
        }
    }
}

impl From<CustomStream> for StreamSpec {
    fn from(custom: CustomStream) -> Self {
        StreamSpec::Custom(custom)
    }
}

impl From<StringSink> for StreamSpec {
    fn from(sink: StringSink) -> Self {
        StreamSpec::Custom(sink.into())
    }
}

/// Uniform write/flush over every kind of destination
pub struct OutputStream {
    sink: Box<dyn StreamSink>,
}

impl OutputStream {
    pub fn new(spec: impl Into<StreamSpec>) -> Result<Self> {
        Self::with_host(spec, Arc::new(ProcessHost))
    }

    /// Like [`OutputStream::new`], with console behaviour decided by `host`
    pub fn with_host(spec: impl Into<StreamSpec>, host: Arc<dyn HostEnvironment>) -> Result<Self> {
        let sink: Box<dyn StreamSink> = match spec.into() {
            StreamSpec::Stdout => Box::new(ConsoleSink::new(ConsoleTarget::Stdout, host)),
            StreamSpec::Stderr => Box::new(ConsoleSink::new(ConsoleTarget::Stderr, host)),
            StreamSpec::Named(name) => Box::new(ConsoleSink::new(name.parse()?, host)),
            StreamSpec::Custom(custom) => Box::new(custom.into_sink()?),
            StreamSpec::Sink(sink) => sink,
        };
        Ok(Self { sink })
    }

    pub fn write(&mut self, text: &str) -> Result<()> {
        self.sink.write(text)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    pub fn name(&self) -> &str {
        self.sink.name()
    }
}

impl fmt::Debug for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputStream")
            .field("sink", &self.sink.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MissingCapability, TaskLoggerError};

    #[test]
    fn test_named_streams() {
        assert_eq!(OutputStream::new("stdout").unwrap().name(), "stdout");
        assert_eq!(OutputStream::new("stderr").unwrap().name(), "stderr");
        assert_eq!(OutputStream::new(StreamSpec::default()).unwrap().name(), "stdout");
    }

    #[test]
    fn test_invalid_stream_name() {
        let err = OutputStream::new("invalid").unwrap_err();
        assert!(err.is_invalid_stream());
        assert!(matches!(err, TaskLoggerError::InvalidStreamName(ref s) if s == "invalid"));
    }

    #[test]
    fn test_custom_stream_missing_capabilities() {
        let err = OutputStream::new(CustomStream::new().on_write(|_| Ok(()))).unwrap_err();
        assert!(matches!(
            err,
            TaskLoggerError::InvalidStreamCapability {
                missing: MissingCapability::Flush
            }
        ));

        let err = OutputStream::new(CustomStream::new()).unwrap_err();
        assert!(matches!(
            err,
            TaskLoggerError::InvalidStreamCapability {
                missing: MissingCapability::WriteAndFlush
            }
        ));
    }

    #[test]
    fn test_string_sink_stream() {
        let capture = StringSink::new();
        let mut stream = OutputStream::new(capture.clone()).unwrap();
        stream.write("line\n").unwrap();
        stream.flush().unwrap();
        assert_eq!(capture.contents(), "line\n");
    }

    #[test]
    fn test_boxed_sink() {
        struct CountingSink(usize);

        impl StreamSink for CountingSink {
            fn write(&mut self, _text: &str) -> Result<()> {
                self.0 += 1;
                Ok(())
            }

            fn flush(&mut self) -> Result<()> {
                Ok(())
            }

            fn name(&self) -> &str {
                "counting"
            }
        }

        let mut stream = OutputStream::new(StreamSpec::Sink(Box::new(CountingSink(0)))).unwrap();
        stream.write("a\n").unwrap();
        assert_eq!(stream.name(), "counting");
    }
}
