//! Process-wide logging for the texture layer
//!
//! Every crate of the workspace reports through one replaceable [`Logger`]
//! held in a global slot. Entries carry a severity, a source such as
//! `"texlayer::gl[main]"` and, for errors, the file and line that raised
//! them. Until a logger is installed, entries go to the colored console.

use chrono::{DateTime, Local};
use colored::*;
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;

static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Sink for log entries
///
/// # Example
///
/// ```no_run
/// use std::sync::Mutex;
/// use texture_layer::texlayer::log::{Logger, LogEntry};
///
/// struct Collect(Mutex<Vec<String>>);
///
/// impl Logger for Collect {
///     fn log(&self, entry: &LogEntry) {
///         self.0.lock().unwrap().push(entry.message.clone());
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One emitted log line
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Emitting component, tagged with the device label when one is set
    pub source: String,
    pub message: String,
    /// Set for entries raised through `texlayer_error!` and the error macros
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

/// Severity of a log entry, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-call detail (every native write)
    Trace,
    /// Object creation and skipped work
    Debug,
    Info,
    /// Rejected caller input and recoverable fallbacks
    Warn,
    /// Native failures
    Error,
}

impl LogSeverity {
    fn label(self) -> ColoredString {
        match self {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        }
    }
}

/// Console logger used until another one is installed
///
/// Prints `[time] [SEVERITY] [source] message`, followed by `(file:line)`
/// when the entry carries a location.
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let time: DateTime<Local> = entry.timestamp.into();
        let location = match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(" ({}:{})", file, line),
            _ => String::new(),
        };
        println!(
            "[{}] [{}] [{}] {}{}",
            time.format("%Y-%m-%d %H:%M:%S%.3f"),
            entry.severity.label(),
            entry.source.bright_blue(),
            entry.message,
            location
        );
    }
}

// ===== LOGGER SLOT =====

fn logger_slot() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn emit(entry: LogEntry) {
    if let Ok(logger) = logger_slot().read() {
        logger.log(&entry);
    }
}

/// Install `logger` for the whole process
///
/// # Example
///
/// ```no_run
/// use texture_layer::texlayer::log::{self, Logger, LogEntry};
///
/// struct Silent;
/// impl Logger for Silent {
///     fn log(&self, _entry: &LogEntry) {}
/// }
///
/// log::set_logger(Silent);
/// ```
pub fn set_logger<L: Logger + 'static>(logger: L) {
    if let Ok(mut slot) = logger_slot().write() {
        *slot = Box::new(logger);
    }
}

/// Go back to the console logger
pub fn reset_logger() {
    set_logger(DefaultLogger);
}

/// Emit an entry without a source location (used by the severity macros)
pub fn log(severity: LogSeverity, source: &str, message: String) {
    emit(LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: source.to_owned(),
        message,
        file: None,
        line: None,
    });
}

/// Emit an entry that records where it was raised
pub fn log_detailed(severity: LogSeverity, source: &str, message: String, file: &'static str, line: u32) {
    emit(LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: source.to_owned(),
        message,
        file: Some(file),
        line: Some(line),
    });
}

// ===== SEVERITY MACROS =====

/// Emit a Trace entry
#[macro_export]
macro_rules! texlayer_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Emit a Debug entry
///
/// # Example
///
/// ```no_run
/// texture_layer::texlayer_debug!("texlayer::gl", "Allocated {} mip levels", 4);
/// ```
#[macro_export]
macro_rules! texlayer_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Emit an Info entry
#[macro_export]
macro_rules! texlayer_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Emit a Warn entry
#[macro_export]
macro_rules! texlayer_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Emit an Error entry with the caller's file and line
#[macro_export]
macro_rules! texlayer_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

// ===== ERROR MACROS =====

/// Log an ERROR and build the matching error variant
///
/// # Example
///
/// ```no_run
/// use texture_layer::texlayer_err;
///
/// let err = texlayer_err!("texlayer::gl", BackendError, "glGetError returned 0x{:04X}", 0x0505);
/// ```
#[macro_export]
macro_rules! texlayer_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::texlayer::Error::$kind(message)
    }};
}

/// Log an ERROR and return the matching error variant from the enclosing function
#[macro_export]
macro_rules! texlayer_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::texlayer_err!($source, $kind, $($arg)*))
    };
}

/// Log a WARN and build the matching error variant (caller-side validation failures)
#[macro_export]
macro_rules! texlayer_warn_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::log(
            $crate::log::LogSeverity::Warn,
            $source,
            message.clone()
        );
        $crate::texlayer::Error::$kind(message)
    }};
}

/// Log a WARN and return the matching error variant from the enclosing function
#[macro_export]
macro_rules! texlayer_bail_warn {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::texlayer_warn_err!($source, $kind, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
