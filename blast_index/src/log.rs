//! Internal logging system for the blast index
//!
//! This module provides:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored stderr output by default
//! - File and line information for detailed ERROR logs
//!
//! The sink and the severity filter live in [`Diagnostics`](crate::blast::Diagnostics).

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to forward index diagnostics into the host's own
/// logging (game console, file, telemetry).
///
/// # Example
///
/// ```no_run
/// use blast_index::blast::log::{Logger, LogEntry};
///
/// struct ConsoleOverlay;
///
/// impl Logger for ConsoleOverlay {
///     fn log(&self, entry: &LogEntry) {
///         // Push to the in-game console...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "blast::Octree")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-operation detail (rejected inserts, update summaries)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (potential issues)
    Warn,

    /// Error messages (configuration bugs, with file:line details)
    Error,
}

/// Colored stderr logger installed until the host replaces it
///
/// Writes `[time] [LEVEL] [source] message`, followed by `(file:line)`
/// when the entry carries a location. Stderr keeps index diagnostics out of
/// the host's regular output.
pub struct DefaultLogger;

impl DefaultLogger {
    fn label(severity: LogSeverity) -> ColoredString {
        match severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let local: DateTime<Local> = entry.timestamp.into();
        let location = match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(" ({}:{})", file, line),
            _ => String::new(),
        };

        eprintln!(
            "[{}] [{}] [{}] {}{}",
            local.format("%H:%M:%S%.3f"),
            Self::label(entry.severity),
            entry.source.bright_blue(),
            entry.message,
            location,
        );
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
///
/// ```ignore
/// index_trace!("blast::Octree", "insert rejected: {:?}", bounds);
/// ```
#[macro_export]
macro_rules! index_trace {
    ($source:expr, $($arg:tt)*) => {
        if $crate::blast::Diagnostics::enabled($crate::blast::log::LogSeverity::Trace) {
            $crate::blast::Diagnostics::log(
                $crate::blast::log::LogSeverity::Trace,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! index_debug {
    ($source:expr, $($arg:tt)*) => {
        if $crate::blast::Diagnostics::enabled($crate::blast::log::LogSeverity::Debug) {
            $crate::blast::Diagnostics::log(
                $crate::blast::log::LogSeverity::Debug,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log an INFO message
///
/// Exported for hosts that report through the same sink as the index.
#[macro_export]
macro_rules! index_info {
    ($source:expr, $($arg:tt)*) => {
        if $crate::blast::Diagnostics::enabled($crate::blast::log::LogSeverity::Info) {
            $crate::blast::Diagnostics::log(
                $crate::blast::log::LogSeverity::Info,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! index_warn {
    ($source:expr, $($arg:tt)*) => {
        if $crate::blast::Diagnostics::enabled($crate::blast::log::LogSeverity::Warn) {
            $crate::blast::Diagnostics::log(
                $crate::blast::log::LogSeverity::Warn,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! index_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::blast::Diagnostics::log_detailed(
            $crate::blast::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR and build an `Error::InvalidConfig` from the same message
///
/// ```ignore
/// return Err(index_err!("blast::OctreeConfig", "min_size must be > 0 (got {})", size));
/// ```
#[macro_export]
macro_rules! index_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::blast::Diagnostics::log_detailed(
            $crate::blast::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::blast::Error::InvalidConfig(message)
    }};
}

/// Early-return variant of `index_err!`
#[macro_export]
macro_rules! index_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::index_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
