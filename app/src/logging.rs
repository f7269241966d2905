//! FILENAME: app/src/logging.rs
// PURPOSE: Unified logging system for the application.
// FORMAT: seq|level|category|message

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use once_cell::sync::Lazy;

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "bizdesk.log";

// ============================================================================
// UNIFIED LOGGING SYSTEM
// ============================================================================

/// Sequence number of the last line written
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Open log file; `None` means console-only logging
static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Path of the active log file, once initialized
static LOG_PATH: Lazy<Mutex<Option<PathBuf>>> = Lazy::new(|| Mutex::new(None));

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Get the log file path, if logging to a file has been initialized
pub fn get_log_path() -> Option<PathBuf> {
    LOG_PATH.lock().ok().and_then(|guard| guard.clone())
}

/// Initialize the unified log file inside `log_dir` (created if missing).
/// The file is truncated on every start.
pub fn init_log_file(log_dir: &Path) -> Result<PathBuf, String> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)
            .map_err(|e| format!("Failed to create log dir at {:?}: {}", log_dir, e))?;
    }

    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&log_path)
        .map_err(|e| format!("Failed to create log file {:?}: {}", log_path, e))?;

    let mut log_file = LOG_FILE.lock()
        .map_err(|e| format!("Lock error: {}", e))?;
    *log_file = Some(file);

    if let Ok(mut guard) = LOG_PATH.lock() {
        *guard = Some(log_path.clone());
    }

    Ok(log_path)
}

/// Install the console backend for the `log` facade. Lines are printed as
/// already formatted; `RUST_LOG` overrides the default `info` filter.
/// Returns false when a logger was already installed.
pub fn init_console_logger() -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .try_init()
        .is_ok()
}

fn to_log_level(level: &str) -> log::Level {
    match level {
        "E" => log::Level::Error,
        "W" => log::Level::Warn,
        "I" => log::Level::Info,
        "D" => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

/// Write a log line in unified format.
/// The line goes to the log file (when initialized) and to the `log` facade,
/// with the category as target.
pub fn write_log(level: &str, category: &str, message: &str) {
    let seq = next_seq();
    let line = format!("{}|{}|{}|{}", seq, level, category, message);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            if let Err(e) = writeln!(file, "{}", line) {
                eprintln!("[LOG_ERROR] Failed to write: {}", e);
            }
            let _ = file.flush();
        }
    }

    log::log!(target: category, to_log_level(level), "{}", line);
}

/// Boundary of a traced call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracePhase {
    Enter,
    Exit,
}

/// Write an ENTER/EXIT line: `ENTER <func> [detail]`.
pub fn write_trace(level: &str, category: &str, phase: TracePhase, func_name: &str, detail: &str) {
    let tag = match phase {
        TracePhase::Enter => "ENTER",
        TracePhase::Exit => "EXIT",
    };
    if detail.is_empty() {
        write_log(level, category, &format!("{} {}", tag, func_name));
    } else {
        write_log(level, category, &format!("{} {} {}", tag, func_name, detail));
    }
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("D", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("I", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("W", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("E", $cat, &format!($($arg)*))
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_trace("D", $cat, $crate::logging::TracePhase::Enter, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_trace("D", $cat, $crate::logging::TracePhase::Enter, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_trace("D", $cat, $crate::logging::TracePhase::Exit, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_trace("D", $cat, $crate::logging::TracePhase::Exit, $func, &format!($($arg)*))
    };
}

// Info-level ENTER/EXIT for more important function traces

#[macro_export]
macro_rules! log_enter_info {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_trace("I", $cat, $crate::logging::TracePhase::Enter, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_trace("I", $cat, $crate::logging::TracePhase::Enter, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit_info {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_trace("I", $cat, $crate::logging::TracePhase::Exit, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_trace("I", $cat, $crate::logging::TracePhase::Exit, $func, &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = next_seq();
        let b = next_seq();
        assert!(b > a);
    }

    #[test]
    fn test_lines_reach_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_log_file(&dir.path().join("logs")).unwrap();
        assert_eq!(get_log_path(), Some(path.clone()));

        write_log("W", "TEST", "low stock on Bagel");
        write_trace("I", "TEST", TracePhase::Exit, "calculate_prices", "rows=4");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        let warn = lines.iter().find(|l| l.ends_with("|W|TEST|low stock on Bagel"));
        assert!(warn.is_some());
        assert!(lines.iter().any(|l| l.ends_with("|I|TEST|EXIT calculate_prices rows=4")));
        assert!(warn.unwrap().split('|').next().unwrap().parse::<u64>().is_ok());
    }

    #[test]
    fn test_console_logger_installs_once() {
        init_console_logger();
        assert!(!init_console_logger());
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(to_log_level("E"), log::Level::Error);
        assert_eq!(to_log_level("W"), log::Level::Warn);
        assert_eq!(to_log_level("I"), log::Level::Info);
        assert_eq!(to_log_level("D"), log::Level::Debug);
        assert_eq!(to_log_level("?"), log::Level::Trace);
    }
}
