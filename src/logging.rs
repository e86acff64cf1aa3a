//! File logging for FuzzMenu
//!
//! The launcher never shows errors to the user, so everything that degrades
//! silently (skipped descriptors, missing icons, failed launches, cache write
//! failures) ends up here instead.
//!
//! The log lives in the user cache directory and is truncated on every run.

use chrono::Local;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::desktop_entry::ParseWarning;

/// Global logger instance
static LOGGER: OnceLock<Mutex<FuzzMenuLogger>> = OnceLock::new();

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        })
    }
}

/// Main logger struct
pub struct FuzzMenuLogger {
    file: Option<File>,
    path: PathBuf,
    min_level: LogLevel,
}

impl FuzzMenuLogger {
    fn new(path: PathBuf, min_level: LogLevel) -> Self {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true) // Start fresh each run
            .open(&path)
            .ok();

        Self {
            file,
            path,
            min_level,
        }
    }

    /// Default log file path: `$XDG_CACHE_HOME/fuzzmenu/fuzzmenu.log`
    pub fn default_path() -> PathBuf {
        xdg::BaseDirectories::new()
            .map(|dirs| dirs.get_cache_home())
            .unwrap_or_else(|_| std::env::temp_dir())
            .join(crate::APP_DIR_NAME)
            .join("fuzzmenu.log")
    }

    fn format_entry(level: LogLevel, module: &str, message: &str) -> String {
        format!(
            "[{}] [{:5}] [{}] {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            level,
            module,
            message
        )
    }

    fn log(&mut self, level: LogLevel, module: &str, message: &str) {
        if level < self.min_level {
            return;
        }

        let entry = Self::format_entry(level, module, message);
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(entry.as_bytes());
        }
    }
}

/// Initialize the global logger. Later calls are ignored.
pub fn init(path: &Path, min_level: LogLevel) {
    let _ = LOGGER.set(Mutex::new(FuzzMenuLogger::new(path.to_path_buf(), min_level)));
}

/// Path of the active log file, if the logger was initialized
pub fn log_path() -> Option<PathBuf> {
    LOGGER.get().map(|logger| logger.lock().path.clone())
}

fn log(level: LogLevel, module: &str, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.lock().log(level, module, message);
    }
}

/// Log debug message
pub fn debug(module: &str, message: &str) {
    log(LogLevel::Debug, module, message);
}

/// Log info message
pub fn info(module: &str, message: &str) {
    log(LogLevel::Info, module, message);
}

/// Log warning message
pub fn warn(module: &str, message: &str) {
    log(LogLevel::Warn, module, message);
}

/// Log error message
pub fn error(module: &str, message: &str) {
    log(LogLevel::Error, module, message);
}

// ============================================================================
// Specialized logging functions for different components
// ============================================================================

/// Log the outcome of a descriptor scan
pub fn log_scan_summary(dirs: &[PathBuf], applications: usize, skipped: usize, warnings: usize) {
    let dirs = dirs
        .iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let msg = format!(
        "Scan of [{}]: {} applications, {} skipped, {} warnings",
        dirs, applications, skipped, warnings
    );
    info("SCANNER", &msg);
}

/// Log a defaulted or malformed descriptor field
pub fn log_parse_warning(filename: &str, warning: &ParseWarning) {
    debug("PARSER", &format!("{}: {}", filename, warning));
}

/// Log a launch request
pub fn log_launch(name: &str, command_line: &str) {
    info("LAUNCH", &format!("opening '{}': {}", name, command_line));
}

/// Flush the log file
pub fn flush() {
    if let Some(logger) = LOGGER.get() {
        if let Some(ref mut file) = logger.lock().file {
            let _ = file.flush();
        }
    }
}

/// Write a separator line for readability
pub fn separator(label: &str) {
    let msg = format!("========== {} ==========", label);
    info("---", &msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn entry_carries_level_module_and_message() {
        let entry = FuzzMenuLogger::format_entry(LogLevel::Warn, "CACHE", "write failed");
        assert!(entry.contains("[WARN ]"));
        assert!(entry.contains("[CACHE] write failed"));
        assert!(entry.ends_with('\n'));
    }

    #[test]
    fn below_min_level_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let mut logger = FuzzMenuLogger::new(path.clone(), LogLevel::Info);
        logger.log(LogLevel::Debug, "T", "hidden");
        logger.log(LogLevel::Info, "T", "shown");
        drop(logger);

        let text = std::fs::read_to_string(path).unwrap();
        assert!(!text.contains("hidden"));
        assert!(text.contains("shown"));
    }
}
