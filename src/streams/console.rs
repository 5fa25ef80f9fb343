//! Console destinations
//!
//! Outside notebook hosts, lines are written straight to the file descriptor
//! with `write(2)`. Embeddings such as foreign-language bridges often replace
//! the process-level stdout object while leaving descriptor 1 intact, and a
//! direct write still reaches the terminal there. Notebook kernels capture
//! output at the buffered layer instead, so they get the buffered channel.

use crate::core::{Result, StreamSink, TaskLoggerError};
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

impl ConsoleTarget {
    pub fn name(&self) -> &'static str {
        match self {
            ConsoleTarget::Stdout => "stdout",
            ConsoleTarget::Stderr => "stderr",
        }
    }

    #[cfg(unix)]
    pub fn raw_fd(&self) -> libc::c_int {
        match self {
            ConsoleTarget::Stdout => libc::STDOUT_FILENO,
            ConsoleTarget::Stderr => libc::STDERR_FILENO,
        }
    }

    fn buffered_write(&self, bytes: &[u8]) -> io::Result<()> {
        match self {
            ConsoleTarget::Stdout => io::stdout().lock().write_all(bytes),
            ConsoleTarget::Stderr => io::stderr().lock().write_all(bytes),
        }
    }

    fn buffered_flush(&self) -> io::Result<()> {
        match self {
            ConsoleTarget::Stdout => io::stdout().flush(),
            ConsoleTarget::Stderr => io::stderr().flush(),
        }
    }
}

impl FromStr for ConsoleTarget {
    type Err = TaskLoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stdout" => Ok(ConsoleTarget::Stdout),
            "stderr" => Ok(ConsoleTarget::Stderr),
            other => Err(TaskLoggerError::InvalidStreamName(other.to_string())),
        }
    }
}

/// Facts about the hosting process that change how the console is written.
pub trait HostEnvironment: Send + Sync {
    /// True inside an interactive notebook kernel
    fn is_notebook(&self) -> bool;

    /// False when the host closed the descriptor or swapped in a null sink
    fn console_attached(&self, target: ConsoleTarget) -> bool;
}

/// Detects the environment of the running process
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessHost;

impl HostEnvironment for ProcessHost {
    fn is_notebook(&self) -> bool {
        // set by Jupyter for every kernel it launches
        std::env::var_os("JPY_PARENT_PID").is_some()
    }

    #[cfg(unix)]
    fn console_attached(&self, target: ConsoleTarget) -> bool {
        // SAFETY: F_GETFD only queries descriptor flags
        unsafe { libc::fcntl(target.raw_fd(), libc::F_GETFD) != -1 }
    }

    #[cfg(not(unix))]
    fn console_attached(&self, _target: ConsoleTarget) -> bool {
        true
    }
}

/// How a console line reaches its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WritePath {
    /// Through the process's buffered stdio handle
    Buffered,
    /// Straight to the file descriptor with `write(2)`
    Descriptor,
}

pub struct ConsoleSink {
    target: ConsoleTarget,
    host: Arc<dyn HostEnvironment>,
}

impl ConsoleSink {
    pub fn new(target: ConsoleTarget, host: Arc<dyn HostEnvironment>) -> Self {
        Self { target, host }
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    fn write_path(&self) -> WritePath {
        if cfg!(unix) && !self.host.is_notebook() {
            WritePath::Descriptor
        } else {
            WritePath::Buffered
        }
    }

    fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        match self.write_path() {
            WritePath::Buffered => self.target.buffered_write(bytes),
            WritePath::Descriptor => self.write_direct(bytes),
        }
    }

    #[cfg(unix)]
    fn write_direct(&self, bytes: &[u8]) -> io::Result<()> {
        write_fd_or_else(self.target.raw_fd(), bytes, |bytes| {
            self.target.buffered_write(bytes)
        })
    }

    #[cfg(not(unix))]
    fn write_direct(&self, bytes: &[u8]) -> io::Result<()> {
        self.target.buffered_write(bytes)
    }
}

impl StreamSink for ConsoleSink {
    fn write(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes()).map_err(|e| {
            TaskLoggerError::io_operation(format!("writing to {}", self.target.name()), e)
        })
    }

    fn flush(&mut self) -> Result<()> {
        if !self.host.console_attached(self.target) {
            return Ok(());
        }
        self.target.buffered_flush().map_err(|e| {
            TaskLoggerError::io_operation(format!("flushing {}", self.target.name()), e)
        })
    }

    fn name(&self) -> &str {
        self.target.name()
    }
}

/// Writes all of `bytes` to `fd`. A descriptor rejected with EBADF (seen on
/// some legacy consoles) hands the bytes to `fallback`; any other failure is
/// returned.
#[cfg(unix)]
fn write_fd_or_else<F>(fd: libc::c_int, bytes: &[u8], fallback: F) -> io::Result<()>
where
    F: FnOnce(&[u8]) -> io::Result<()>,
{
    match write_fd(fd, bytes) {
        Err(e) if e.raw_os_error() == Some(libc::EBADF) => fallback(bytes),
        other => other,
    }
}

#[cfg(unix)]
fn write_fd(fd: libc::c_int, bytes: &[u8]) -> io::Result<()> {
    let mut written = 0;
    while written < bytes.len() {
        // SAFETY: bytes[written..] is a valid slice for the given length
        let result = unsafe {
            libc::write(
                fd,
                bytes[written..].as_ptr().cast::<libc::c_void>(),
                bytes.len() - written,
            )
        };
        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        written += result as usize;
    }
    Ok(())
}
