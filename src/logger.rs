//! Console logger behind the `log` facade.
//!
//! Library code only calls `log::info!` and friends; binaries pick the
//! output style once with [`init`] or [`init_with_config`].

use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

static STUDY_LOGGER: Lazy<StudyLogger> = Lazy::new(StudyLogger::new);
static INSTALLED: AtomicBool = AtomicBool::new(false);

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::default())
}

/// Installs the logger. Calling it again only swaps the configuration;
/// it fails if some other logger already owns the `log` facade.
pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    let level = config.min_level;
    STUDY_LOGGER.configure(config)?;

    let installed = log::set_logger(&*STUDY_LOGGER).is_ok();
    if installed {
        INSTALLED.store(true, Ordering::SeqCst);
    }
    check_installation(installed, INSTALLED.load(Ordering::SeqCst))?;

    log::set_max_level(level);
    Ok(())
}

fn check_installation(installed_now: bool, ours_active: bool) -> Result<(), String> {
    if installed_now || ours_active {
        Ok(())
    } else {
        Err("Failed to set logger: another logger is already installed".to_string())
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LevelFilter,
    pub show_colors: bool,
    pub show_file_location: bool,
    pub show_module: bool,
    pub timestamp_format: String,
    pub output_json: bool,
    pub log_file_path: Option<String>,
    pub prefix: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: true,
            show_file_location: false,
            show_module: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            output_json: false,
            log_file_path: None,
            prefix: Some("studyai".to_string()),
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_json_output(mut self, enabled: bool) -> Self {
        self.output_json = enabled;
        self
    }

    pub fn with_file_output(mut self, path: &str) -> Self {
        self.log_file_path = Some(path.to_string());
        self
    }

    /// Reads `STUDYAI_LOG` (error, warn, info, debug, trace).
    pub fn from_env() -> Self {
        let level = std::env::var("STUDYAI_LOG")
            .ok()
            .and_then(|s| s.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info);
        Self::default().with_level(level)
    }

    pub fn development() -> Self {
        Self {
            min_level: LevelFilter::Debug,
            show_file_location: true,
            ..Default::default()
        }
    }

    pub fn production() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: false,
            output_json: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub module: String,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl LogEntry {
    fn from_record(record: &Record) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level: record.level().to_string(),
            module: record.module_path().unwrap_or("unknown").to_string(),
            message: record.args().to_string(),
            file: record.file().map(String::from),
            line: record.line(),
        }
    }
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Trace => Color::Cyan,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

pub struct StudyLogger {
    config: Mutex<LoggerConfig>,
    log_file: Mutex<Option<File>>,
}

impl StudyLogger {
    fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
            log_file: Mutex::new(None),
        }
    }

    fn configure(&self, config: LoggerConfig) -> Result<(), String> {
        let file = match &config.log_file_path {
            Some(path) => Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| format!("Failed to open log file {}: {}", path, e))?,
            ),
            None => None,
        };

        *self.log_file.lock().map_err(|e| e.to_string())? = file;
        *self.config.lock().map_err(|e| e.to_string())? = config;
        Ok(())
    }

    fn format_line(entry: &LogEntry, level: Level, config: &LoggerConfig) -> String {
        let mut line = String::new();
        let colors = config.show_colors;

        if let Some(prefix) = &config.prefix {
            if colors {
                line.push_str(&format!("[{}] ", prefix.bright_white().bold()));
            } else {
                line.push_str(&format!("[{}] ", prefix));
            }
        }

        let stamp = entry.timestamp.format(&config.timestamp_format).to_string();
        let tag = format!("{:<5}", entry.level);
        if colors {
            line.push_str(&format!(
                "{} {} ",
                stamp.bright_black(),
                tag.color(level_color(level)).bold()
            ));
        } else {
            line.push_str(&format!("{} {} ", stamp, tag));
        }

        if config.show_module {
            if colors {
                line.push_str(&format!("{} ", entry.module.bright_blue()));
            } else {
                line.push_str(&format!("{} ", entry.module));
            }
        }

        line.push_str(&entry.message);

        if config.show_file_location {
            if let (Some(file), Some(no)) = (&entry.file, entry.line) {
                let location = format!("({}:{})", file, no);
                if colors {
                    line.push_str(&format!(" {}", location.bright_black()));
                } else {
                    line.push_str(&format!(" {}", location));
                }
            }
        }

        line
    }
}

impl log::Log for StudyLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.config
            .lock()
            .map(|config| metadata.level() <= config.min_level)
            .unwrap_or(true)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = LogEntry::from_record(record);
        let Ok(config) = self.config.lock() else {
            return;
        };

        let rendered = if config.output_json {
            serde_json::to_string(&entry).unwrap_or_default()
        } else {
            Self::format_line(&entry, record.level(), &config)
        };
        eprintln!("{}", rendered);

        if let Ok(mut guard) = self.log_file.lock() {
            if let Some(file) = guard.as_mut() {
                let plain = if config.output_json {
                    rendered
                } else {
                    Self::format_line(&entry, record.level(), &config.clone().with_colors(false))
                };
                let _ = writeln!(file, "{}", plain);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Ok(mut guard) = self.log_file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Logs how long a scope took when dropped.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::debug!("{} finished in {}ms", self.name, self.elapsed().as_millis());
    }
}

pub fn timer(name: &str) -> Timer {
    Timer::new(name)
}
