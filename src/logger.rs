//! Custom logging module.
//!
//! Log records are formatted and kept in a bounded in-memory buffer that the
//! log panel renders; nothing is written to the terminal directly since the
//! terminal belongs to the UI.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

const CAPACITY: usize = 200;
const CRATE_TARGET: &str = "dashboard_tui";

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {:5} {}", timestamp, level_str, record.args())
}

/// Shared, bounded list of formatted log lines, oldest first.
///
#[derive(Clone, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == CAPACITY {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Return up to `count` of the newest lines, oldest first.
    ///
    pub fn tail(&self, count: usize) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines
                .iter()
                .skip(lines.len().saturating_sub(count))
                .cloned()
                .collect(),
            Err(_) => vec![],
        }
    }
}

/// Logger that captures records into a `LogBuffer`.
///
pub struct CaptureLogger {
    buffer: LogBuffer,
    level: LevelFilter,
}

impl CaptureLogger {
    pub fn new(buffer: LogBuffer, level: LevelFilter) -> Self {
        CaptureLogger { buffer, level }
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Dependencies only get through with warnings and errors.
        metadata.level() <= self.level
            && (metadata.target().starts_with(CRATE_TARGET) || metadata.level() <= Level::Warn)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.push(format_log(record));
        }
    }

    fn flush(&self) {}
}

/// Install the capture logger globally and return its buffer.
///
pub fn init(level: LevelFilter) -> Result<LogBuffer, AppError> {
    let buffer = LogBuffer::default();
    log::set_boxed_logger(Box::new(CaptureLogger::new(buffer.clone(), level)))
        .map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(buffer)
}

/// Parse a configured level name, falling back to `Info`.
///
pub fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_line(logger: &CaptureLogger, level: Level, target: &str, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target(target)
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn buffer_keeps_newest_lines() {
        let buffer = LogBuffer::default();
        for i in 0..(CAPACITY + 5) {
            buffer.push(format!("line {}", i));
        }
        let tail = buffer.tail(2);
        assert_eq!(tail, vec![format!("line {}", CAPACITY + 3), format!("line {}", CAPACITY + 4)]);
        assert_eq!(buffer.tail(usize::MAX).len(), CAPACITY);
    }

    #[test]
    fn logger_filters_by_level_and_target() {
        let buffer = LogBuffer::default();
        let logger = CaptureLogger::new(buffer.clone(), LevelFilter::Info);

        record_line(&logger, Level::Info, "dashboard_tui::state", "kept");
        record_line(&logger, Level::Debug, "dashboard_tui::state", "too verbose");
        record_line(&logger, Level::Info, "hyper::client", "dependency chatter");
        record_line(&logger, Level::Warn, "hyper::client", "dependency warning");

        let lines = buffer.tail(10);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("kept"));
        assert!(lines[0].contains("INFO"));
        assert!(lines[1].ends_with("dependency warning"));
    }

    #[test]
    fn parse_level_falls_back_to_info() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn init_installs_logger_once() {
        let buffer = init(LevelFilter::Debug).unwrap();
        log::info!("capture logger installed");
        assert!(buffer
            .tail(CAPACITY)
            .iter()
            .any(|line| line.ends_with("INFO  capture logger installed")));

        assert!(matches!(init(LevelFilter::Debug), Err(AppError::Logger(_))));
    }
}
