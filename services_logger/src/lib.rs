//! # Logger Service
//!
//! This crate implements structured logging for the timer registry.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Every significant registry event (a timer starting, every tick, a stall,
//! a cancellation) becomes a [`LogEntry`] with a stable message identifier
//! and typed fields, written to an injected [`LogSink`]. Tests read the
//! captured stream back out of a [`MemoryLog`] and assert on it; the daemon
//! renders entries to the console. Components never print.

use std::fmt;
use std::sync::Mutex;
use timer_types::SlotKey;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Source slot (if the event concerns one)
    pub source: Option<SlotKey>,
    /// Stable message identifier, e.g. `timer.tick`
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            source: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Sets the source slot
    pub fn with_source(mut self, source: SlotKey) -> Self {
        self.source = Some(source);
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Returns the value of a field, if present
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.level)?;
        if let Some(source) = self.source {
            write!(f, " {}", source)?;
        }
        write!(f, " {}", self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// Destination for log entries
///
/// Sinks take `&self` so they can be shared behind an `Arc` and written to
/// from the expiry path while other entries are still being inspected.
pub trait LogSink: Send + Sync {
    /// Records one entry
    fn log(&self, entry: LogEntry);
}

/// In-memory sink that keeps every entry for later inspection
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    /// Creates an empty in-memory log
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all captured entries, in arrival order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Returns the messages of all captured entries, in arrival order
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|e| e.message.clone()).collect()
    }

    /// Returns how many captured entries carry the given message
    pub fn count_message(&self, message: &str) -> usize {
        self.lock().iter().filter(|e| e.message == message).count()
    }

    /// Returns the number of captured entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true when nothing has been logged
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        // A writer that panicked mid-push left the Vec intact; keep serving.
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl LogSink for MemoryLog {
    fn log(&self, entry: LogEntry) {
        self.lock().push(entry);
    }
}

/// Sink that renders entries to standard output
///
/// Used by the host daemon, which owns I/O; library code only ever sees the
/// [`LogSink`] trait.
#[derive(Debug, Default)]
pub struct ConsoleLog;

impl ConsoleLog {
    /// Creates a console sink
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for ConsoleLog {
    fn log(&self, entry: LogEntry) {
        println!("{}", entry);
    }
}
