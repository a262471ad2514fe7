//! Rolling Logger
//!
//! A `log` backend that keeps the most recent records in a circular buffer
//! and forwards each record to the platform sink (browser console on wasm32,
//! stderr elsewhere).

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Default number of records kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// One buffered record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogLine {
    pub fn render(&self) -> String {
        format!("{} {:<5} [{}] {}", self.timestamp, self.level, self.target, self.message)
    }
}

/// Fixed-capacity ring of log lines
#[derive(Debug)]
pub struct RingBuffer {
    capacity: usize,
    lines: VecDeque<LogLine>,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, line: LogLine) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn snapshot(&self) -> Vec<LogLine> {
        self.lines.iter().cloned().collect()
    }
}

pub struct RollingLogger {
    level: LevelFilter,
    buffer: Mutex<RingBuffer>,
}

impl RollingLogger {
    pub fn new(capacity: usize, level: LevelFilter) -> Self {
        Self {
            level,
            buffer: Mutex::new(RingBuffer::new(capacity)),
        }
    }

    /// Copy of the buffered records, oldest first
    pub fn recent(&self) -> Vec<LogLine> {
        match self.buffer.lock() {
            Ok(buf) => buf.snapshot(),
            Err(poisoned) => poisoned.into_inner().snapshot(),
        }
    }

    fn emit(line: &LogLine) {
        #[cfg(target_arch = "wasm32")]
        {
            let text = line.render().into();
            match line.level {
                Level::Error => web_sys::console::error_1(&text),
                Level::Warn => web_sys::console::warn_1(&text),
                Level::Info => web_sys::console::info_1(&text),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&text),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("{}", line.render());
        }
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = LogLine {
            timestamp: chrono::Utc::now().format("%H:%M:%S%.3f").to_string(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        Self::emit(&line);
        match self.buffer.lock() {
            Ok(mut buf) => buf.push(line),
            Err(poisoned) => poisoned.into_inner().push(line),
        }
    }

    fn flush(&self) {}
}

/// Install the global logger. Calling it twice returns an error from `log`.
pub fn init(capacity: usize, level: LevelFilter) -> Result<&'static RollingLogger, SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(capacity, level));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(logger)
}

/// The installed logger, if `init` has run
pub fn global() -> Option<&'static RollingLogger> {
    LOGGER.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(msg: &str) -> LogLine {
        LogLine {
            timestamp: "00:00:00.000".into(),
            level: Level::Info,
            target: "test".into(),
            message: msg.into(),
        }
    }

    #[test]
    fn ring_buffer_drops_oldest() {
        let mut buf = RingBuffer::new(2);
        buf.push(line("a"));
        buf.push(line("b"));
        buf.push(line("c"));
        let msgs: Vec<_> = buf.snapshot().into_iter().map(|l| l.message).collect();
        assert_eq!(msgs, vec!["b", "c"]);
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let mut buf = RingBuffer::new(0);
        buf.push(line("a"));
        buf.push(line("b"));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn logger_filters_by_level() {
        let logger = RollingLogger::new(10, LevelFilter::Warn);
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("t")
                .args(format_args!("skipped"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target("t")
                .args(format_args!("kept"))
                .build(),
        );
        let recent = logger.recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].message, "kept");
        assert!(recent[0].render().contains("[t] kept"));
    }
}
