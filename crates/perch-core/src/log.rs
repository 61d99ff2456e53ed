//! File logger for the controllers.
//!
//! Lines go to `~/.config/perch/logs/perch.log` as
//! `HH:MM:SS.mmm LEVEL module: message`. Once the file passes
//! `max_file_mb` it is shifted to `perch.log.1`, older backups move up one
//! slot, and anything past `backups` is dropped.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

const LOG_FILE_NAME: &str = "perch.log";

/// Logging configuration (`[logging]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Off unless asked for.
    pub enabled: bool,
    pub level: Level,
    /// Size in megabytes that triggers rotation. 0 disables rotation.
    pub max_file_mb: u64,
    /// Rotated files to keep.
    pub backups: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: Level::Info,
            max_file_mb: 10,
            backups: 1,
        }
    }
}

/// Severity, ordered from chattiest to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width specifiers line the columns up.
        f.pad(match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        })
    }
}

struct Logger {
    file: File,
    path: PathBuf,
    min_level: Level,
    max_bytes: u64,
    backups: u32,
    written: u64,
}

impl Logger {
    fn open(path: PathBuf, config: &LogConfig) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            file,
            path,
            min_level: config.level,
            max_bytes: config.max_file_mb.saturating_mul(1024 * 1024),
            backups: config.backups,
            written,
        })
    }

    fn log(&mut self, level: Level, target: &str, args: fmt::Arguments<'_>) {
        if level < self.min_level {
            return;
        }
        let line = format!("{} {level:<5} {target}: {args}\n", timestamp());
        if self.file.write_all(line.as_bytes()).is_err() {
            return;
        }
        self.written += line.len() as u64;
        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate();
        }
    }

    fn backup_path(&self, n: u32) -> PathBuf {
        self.path.with_file_name(format!("{LOG_FILE_NAME}.{n}"))
    }

    fn rotate(&mut self) {
        if self.backups == 0 {
            let _ = fs::remove_file(&self.path);
        } else {
            for n in (1..self.backups).rev() {
                let _ = fs::rename(self.backup_path(n), self.backup_path(n + 1));
            }
            let _ = fs::rename(&self.path, self.backup_path(1));
        }
        if let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            self.file = file;
        }
        self.written = 0;
    }
}

/// Installs the global logger under `~/.config/perch/logs/`.
///
/// No-op when logging is disabled or a logger is already installed.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    if let Some(dir) = crate::config::config_dir() {
        init_in(&dir.join("logs"), config);
    }
}

/// Installs the global logger writing into `log_dir`.
pub fn init_in(log_dir: &Path, config: &LogConfig) {
    if !config.enabled || LOGGER.get().is_some() {
        return;
    }
    if fs::create_dir_all(log_dir).is_err() {
        return;
    }
    if let Ok(logger) = Logger::open(log_dir.join(LOG_FILE_NAME), config) {
        let _ = LOGGER.set(Mutex::new(logger));
    }
}

/// Writes one line through the global logger, if installed.
///
/// Called by the `log_*!` macros with the caller's module path as
/// `target`.
pub fn write(level: Level, target: &str, args: fmt::Arguments<'_>) {
    if let Some(mutex) = LOGGER.get()
        && let Ok(mut logger) = mutex.lock()
    {
        logger.log(level, target, args);
    }
}

/// UTC time of day as `HH:MM:SS.mmm`.
fn timestamp() -> String {
    let since_epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = since_epoch.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600 % 24,
        secs / 60 % 60,
        secs % 60,
        since_epoch.subsec_millis()
    )
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Debug, module_path!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Info, module_path!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Warn, module_path!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Error, module_path!(), format_args!($($arg)*))
    };
}
