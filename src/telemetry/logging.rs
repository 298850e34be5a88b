//! Logging
//!
//! Pluggable observability hook for requests, responses and login attempts.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warn level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Structured fields attached to a log line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogContext {
    /// Operation name.
    pub operation: Option<String>,
    /// Request URL.
    pub url: Option<String>,
    /// HTTP status.
    pub status: Option<u16>,
    /// Additional context.
    pub extra: BTreeMap<String, String>,
}

impl LogContext {
    /// Create new log context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set operation.
    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Set URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set status.
    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add extra context.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    fn extra_fields(&self) -> String {
        self.extra
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Logger interface.
pub trait Logger: Send + Sync {
    /// Log at trace level.
    fn trace(&self, message: &str, context: &LogContext);

    /// Log at debug level.
    fn debug(&self, message: &str, context: &LogContext);

    /// Log at info level.
    fn info(&self, message: &str, context: &LogContext);

    /// Log at warn level.
    fn warn(&self, message: &str, context: &LogContext);

    /// Log at error level.
    fn error(&self, message: &str, context: &LogContext);

    /// Check if a log level is enabled.
    fn is_enabled(&self, level: LogLevel) -> bool;
}

/// Logger forwarding to the `tracing` ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

macro_rules! tracing_event {
    ($macro:ident, $message:expr, $context:expr) => {
        tracing::$macro!(
            operation = $context.operation.as_deref().unwrap_or(""),
            url = $context.url.as_deref().unwrap_or(""),
            status = $context.status,
            extra = %$context.extra_fields(),
            "{}",
            $message
        )
    };
}

impl Logger for TracingLogger {
    fn trace(&self, message: &str, context: &LogContext) {
        tracing_event!(trace, message, context);
    }

    fn debug(&self, message: &str, context: &LogContext) {
        tracing_event!(debug, message, context);
    }

    fn info(&self, message: &str, context: &LogContext) {
        tracing_event!(info, message, context);
    }

    fn warn(&self, message: &str, context: &LogContext) {
        tracing_event!(warn, message, context);
    }

    fn error(&self, message: &str, context: &LogContext) {
        tracing_event!(error, message, context);
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Trace => tracing::enabled!(tracing::Level::TRACE),
            LogLevel::Debug => tracing::enabled!(tracing::Level::DEBUG),
            LogLevel::Info => tracing::enabled!(tracing::Level::INFO),
            LogLevel::Warn => tracing::enabled!(tracing::Level::WARN),
            LogLevel::Error => tracing::enabled!(tracing::Level::ERROR),
        }
    }
}

/// No-op logger implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn trace(&self, _message: &str, _context: &LogContext) {}
    fn debug(&self, _message: &str, _context: &LogContext) {}
    fn info(&self, _message: &str, _context: &LogContext) {}
    fn warn(&self, _message: &str, _context: &LogContext) {}
    fn error(&self, _message: &str, _context: &LogContext) {}
    fn is_enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

/// Log entry for in-memory storage.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub context: LogContext,
    pub timestamp: u64,
}

/// In-memory logger for testing.
pub struct InMemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
    min_level: LogLevel,
}

impl InMemoryLogger {
    /// Create new in-memory logger.
    pub fn new() -> Self {
        Self::with_level(LogLevel::Trace)
    }

    /// Create in-memory logger with minimum level.
    pub fn with_level(min_level: LogLevel) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            min_level,
        }
    }

    /// Get all log entries.
    pub fn get_entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get entries by level.
    pub fn get_entries_by_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.get_entries()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }

    /// Check whether any entry's message or fields contain `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.get_entries().iter().any(|e| {
            e.message.contains(needle)
                || e.context.url.as_deref().is_some_and(|u| u.contains(needle))
                || e.context.extra.values().any(|v| v.contains(needle))
        })
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn log(&self, level: LogLevel, message: &str, context: &LogContext) {
        if level >= self.min_level {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64;

            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(LogEntry {
                    level,
                    message: message.to_string(),
                    context: context.clone(),
                    timestamp: now,
                });
        }
    }
}

impl Default for InMemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for InMemoryLogger {
    fn trace(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Trace, message, context);
    }

    fn debug(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Debug, message, context);
    }

    fn info(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Info, message, context);
    }

    fn warn(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Warn, message, context);
    }

    fn error(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Error, message, context);
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}
