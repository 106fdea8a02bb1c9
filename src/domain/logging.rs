//! Diagnostics for the capture pipeline and the dashboard.
//!
//! Code logs through the `log_*!` macros against one process-wide
//! [`Logger`]. Until [`init_logger`] installs one, entries are dropped; the
//! browser build installs the console logger at start-up. Trace, debug and
//! info calls are compiled out of release builds; warnings and errors are
//! always compiled in.

use derive_more::Display;
use std::fmt;
use std::sync::OnceLock;

/// Severity, least severe first. Displays padded to five columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace,
    #[display(fmt = "DEBUG")]
    Debug,
    #[display(fmt = " INFO")]
    Info,
    #[display(fmt = " WARN")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Layer plus unit that emitted an entry, shown as e.g. `APP:Capture`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch, from the global clock.
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: impl Into<String>) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.into(),
        }
    }
}

/// Wall clock in milliseconds since the Unix epoch.
pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Destination for log entries.
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    /// Levels a sink rejects are never formatted.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn record(&self, level: LogLevel, component: LogComponent, message: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.log(LogEntry::new(level, component, message.to_string()));
        }
    }
}

static LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();
static CLOCK: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// Install the process-wide logger. Later calls are ignored.
pub fn init_logger(logger: Box<dyn Logger>) {
    let _ = LOGGER.set(logger);
}

/// Install the process-wide clock. Later calls are ignored.
pub fn init_time_provider(clock: Box<dyn TimeProvider>) {
    let _ = CLOCK.set(clock);
}

pub fn get_logger() -> &'static dyn Logger {
    LOGGER.get().map(|logger| logger.as_ref()).unwrap_or(&Discard)
}

/// The installed clock, or system UTC when none is installed.
pub fn get_time_provider() -> &'static dyn TimeProvider {
    CLOCK.get().map(|clock| clock.as_ref()).unwrap_or(&UtcClock)
}

struct Discard;

impl Logger for Discard {
    fn log(&self, _entry: LogEntry) {}

    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

/// System clock through chrono; used natively and in tests.
pub struct UtcClock;

impl TimeProvider for UtcClock {
    fn current_timestamp(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        chrono::DateTime::from_timestamp_millis(timestamp as i64)
            .unwrap_or_default()
            .format("%H:%M:%S%.3f")
            .to_string()
    }
}

// Debug-build only.
#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::get_logger().record(
                $crate::domain::logging::LogLevel::Trace,
                $component,
                format_args!($($arg)*),
            );
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::get_logger().record(
                $crate::domain::logging::LogLevel::Debug,
                $component,
                format_args!($($arg)*),
            );
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::get_logger().record(
                $crate::domain::logging::LogLevel::Info,
                $component,
                format_args!($($arg)*),
            );
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().record(
            $crate::domain::logging::LogLevel::Warn,
            $component,
            format_args!($($arg)*),
        );
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().record(
            $crate::domain::logging::LogLevel::Error,
            $component,
            format_args!($($arg)*),
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct AtLeast(LogLevel, Mutex<Vec<LogEntry>>);

    impl Logger for AtLeast {
        fn log(&self, entry: LogEntry) {
            self.1.lock().unwrap().push(entry);
        }

        fn enabled(&self, level: LogLevel) -> bool {
            level >= self.0
        }
    }

    #[test]
    fn record_skips_disabled_levels() {
        let sink = AtLeast(LogLevel::Warn, Mutex::new(Vec::new()));
        let component = LogComponent::Application("Capture");
        sink.record(LogLevel::Debug, component.clone(), format_args!("{} nodes", 3));
        sink.record(LogLevel::Error, component, format_args!("{} failed", "encode"));

        let entries = sink.1.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Error);
        assert_eq!(entries[0].message, "encode failed");
        assert_eq!(entries[0].component.to_string(), "APP:Capture");
    }

    #[test]
    fn levels_display_aligned() {
        let labels: Vec<String> = [LogLevel::Trace, LogLevel::Info, LogLevel::Error]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, ["TRACE", " INFO", "ERROR"]);
        assert!(labels.iter().all(|l| l.len() == 5));
    }

    #[test]
    fn utc_clock_formats_time_of_day() {
        assert_eq!(UtcClock.format_timestamp(3_723_004), "01:02:03.004");
        assert!(UtcClock.current_timestamp() > 1_600_000_000_000);
    }
}
