//! Timer sources used to measure task runtimes
//!
//! A timer is any function returning the current instant in seconds. Only
//! differences between two readings of the same timer are meaningful.

use super::error::{Result, TaskLoggerError};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub type TimerFn = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Which clock a resolved [`Timer`] reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Wall,
    Cpu,
    Custom,
}

/// Caller-facing timer selection
#[derive(Clone, Default)]
pub enum TimerSpec {
    /// Wall-clock seconds since the Unix epoch
    #[default]
    Wall,
    /// CPU seconds consumed by this process
    Cpu,
    /// Process CPU time where available, wall-clock otherwise
    CpuOrWall,
    /// `"wall"`, `"cpu"` or `"cpu-or-wall"`
    Named(String),
    Custom(TimerFn),
}

impl TimerSpec {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        TimerSpec::Custom(Arc::new(f))
    }
}

impl fmt::Debug for TimerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerSpec::Wall => write!(f, "Wall"),
            TimerSpec::Cpu => write!(f, "Cpu"),
            TimerSpec::CpuOrWall => write!(f, "CpuOrWall"),
            TimerSpec::Named(name) => f.debug_tuple("Named").field(name).finish(),
            TimerSpec::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

impl FromStr for TimerSpec {
    type Err = TaskLoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wall" => Ok(TimerSpec::Wall),
            "cpu" => Ok(TimerSpec::Cpu),
            "cpu-or-wall" => Ok(TimerSpec::CpuOrWall),
            other => Err(TaskLoggerError::InvalidTimer(other.to_string())),
        }
    }
}

impl From<&str> for TimerSpec {
    fn from(value: &str) -> Self {
        TimerSpec::Named(value.to_string())
    }
}

impl From<String> for TimerSpec {
    fn from(value: String) -> Self {
        TimerSpec::Named(value)
    }
}

/// A resolved timer function
#[derive(Clone)]
pub struct Timer {
    kind: TimerKind,
    now: TimerFn,
}

impl Timer {
    pub fn resolve(spec: TimerSpec) -> Result<Self> {
        match spec {
            TimerSpec::Wall => Ok(Self::wall()),
            TimerSpec::Cpu => Self::cpu(),
            TimerSpec::CpuOrWall => Ok(Self::cpu().unwrap_or_else(|_| Self::wall())),
            TimerSpec::Named(name) => Self::resolve(name.parse()?),
            TimerSpec::Custom(now) => Ok(Self {
                kind: TimerKind::Custom,
                now,
            }),
        }
    }

    pub fn wall() -> Self {
        Self {
            kind: TimerKind::Wall,
            now: Arc::new(wall_clock),
        }
    }

    /// Fails with `UnsupportedTimer` when the platform has no process clock
    pub fn cpu() -> Result<Self> {
        process_cpu_time()?;
        Ok(Self {
            kind: TimerKind::Cpu,
            now: Arc::new(|| reading_or_report("cpu", process_cpu_time())),
        })
    }

    #[inline]
    pub fn now(&self) -> f64 {
        (self.now)()
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::wall()
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer").field("kind", &self.kind).finish()
    }
}

/// A clock that passed its probe can still fail later. The reading has no
/// caller to return an error to, so the failure goes to stderr and the
/// reading is 0.0.
fn reading_or_report(timer: &str, reading: Result<f64>) -> f64 {
    match reading {
        Ok(seconds) => seconds,
        Err(e) => {
            eprintln!("[TASKLOGGER ERROR] Failed to read the {} timer: {}", timer, e);
            0.0
        }
    }
}

/// Seconds since the Unix epoch
pub fn wall_clock() -> f64 {
    let now = chrono::Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) * 1e-9
}

/// CPU seconds consumed by the current process
#[cfg(unix)]
pub fn process_cpu_time() -> Result<f64> {
    // SAFETY: an all-zero timespec is a valid value
    let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
    // SAFETY: ts is a valid, writable timespec
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) };
    if rc != 0 {
        return Err(TaskLoggerError::unsupported_timer(
            "cpu",
            std::io::Error::last_os_error().to_string(),
        ));
    }
    Ok(ts.tv_sec as f64 + ts.tv_nsec as f64 * 1e-9)
}

#[cfg(not(unix))]
pub fn process_cpu_time() -> Result<f64> {
    Err(TaskLoggerError::unsupported_timer(
        "cpu",
        "process CPU clock is only available on unix targets",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_timers() {
        assert_eq!(Timer::resolve("wall".into()).unwrap().kind(), TimerKind::Wall);
        assert_eq!(Timer::resolve(TimerSpec::default()).unwrap().kind(), TimerKind::Wall);

        let err = Timer::resolve("sundial".into()).unwrap_err();
        assert!(matches!(err, TaskLoggerError::InvalidTimer(ref s) if s == "sundial"));
    }

    #[test]
    fn test_custom_timer() {
        let timer = Timer::resolve(TimerSpec::custom(|| 42.5)).unwrap();
        assert_eq!(timer.kind(), TimerKind::Custom);
        assert_eq!(timer.now(), 42.5);
    }

    #[test]
    fn test_failed_reading_is_reported() {
        assert_eq!(reading_or_report("cpu", Ok(3.25)), 3.25);

        let failed = Err(TaskLoggerError::unsupported_timer("cpu", "clock vanished"));
        assert_eq!(reading_or_report("cpu", failed), 0.0);
    }

    #[test]
    fn test_wall_clock_advances() {
        let timer = Timer::wall();
        let start = timer.now();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let elapsed = timer.now() - start;
        assert!(elapsed >= 0.015, "elapsed was {}", elapsed);
        // sanity check against the epoch: after 2020-01-01
        assert!(start > 1_577_836_800.0);
    }

    #[cfg(unix)]
    #[test]
    fn test_cpu_timer_counts_busy_work() {
        let timer = Timer::resolve("cpu".into()).unwrap();
        assert_eq!(timer.kind(), TimerKind::Cpu);

        let start = timer.now();
        let wall_start = wall_clock();
        let mut acc = 0u64;
        while wall_clock() - wall_start < 0.05 {
            acc = acc.wrapping_add(std::hint::black_box(1));
        }
        let elapsed = timer.now() - start;
        assert!(acc > 0);
        assert!(elapsed > 0.01, "busy loop should burn CPU time, got {}", elapsed);
    }

    #[cfg(unix)]
    #[test]
    fn test_cpu_or_wall_prefers_cpu() {
        let timer = Timer::resolve(TimerSpec::CpuOrWall).unwrap();
        assert_eq!(timer.kind(), TimerKind::Cpu);
    }

    #[cfg(not(unix))]
    #[test]
    fn test_cpu_unsupported() {
        assert!(matches!(
            Timer::resolve(TimerSpec::Cpu),
            Err(TaskLoggerError::UnsupportedTimer { .. })
        ));
        assert_eq!(Timer::resolve(TimerSpec::CpuOrWall).unwrap().kind(), TimerKind::Wall);
    }
}
