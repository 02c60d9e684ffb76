//! Console Logger
//!
//! `log` backend for the browser: records go to the devtools console on
//! wasm32 and to stderr elsewhere. The most recent lines are also kept in a
//! fixed-size ring buffer so they can be shown or copied from the page.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Lines kept when no capacity is given
pub const DEFAULT_CAPACITY: usize = 200;

/// Circular buffer of formatted log lines
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

struct ConsoleLogger {
    level: LevelFilter,
    buffer: Mutex<RingBuffer>,
}

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// `[LEVEL target] message`
pub fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{level} {target}] {message}")
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), record.target(), &record.args().to_string());
        emit(record.level(), &line);
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(line);
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// Install the logger. Later calls keep the first configuration.
pub fn init(level: LevelFilter) {
    init_with_capacity(level, DEFAULT_CAPACITY);
}

pub fn init_with_capacity(level: LevelFilter, capacity: usize) {
    let mut fresh = false;
    let logger = LOGGER.get_or_init(|| {
        fresh = true;
        ConsoleLogger {
            level,
            buffer: Mutex::new(RingBuffer::new(capacity)),
        }
    });
    if fresh && log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}

/// Recent log lines, oldest first. Empty before `init`.
pub fn recent() -> Vec<String> {
    LOGGER
        .get()
        .and_then(|logger| logger.buffer.lock().ok().map(|b| b.snapshot()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut buffer = RingBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {i}"));
        }
        assert_eq!(buffer.snapshot(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut buffer = RingBuffer::new(0);
        buffer.push("a".to_string());
        buffer.push("b".to_string());
        assert_eq!(buffer.snapshot(), vec!["b"]);
    }

    #[test]
    fn test_format() {
        assert_eq!(
            format_record(Level::Warn, "shoplist_sync::engine", "toggle refused"),
            "[WARN shoplist_sync::engine] toggle refused"
        );
    }

    #[test]
    fn test_init_is_idempotent_and_buffers() {
        init_with_capacity(LevelFilter::Info, 2);
        init(LevelFilter::Trace);
        log::debug!(target: "t", "hidden");
        log::info!(target: "t", "one");
        log::warn!(target: "t", "two");
        log::error!(target: "t", "three");
        let lines = recent();
        assert_eq!(lines, vec!["[WARN t] two", "[ERROR t] three"]);
    }
}
