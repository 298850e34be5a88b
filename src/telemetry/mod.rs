//! Telemetry
//!
//! Structured logging with pluggable sinks.

pub mod logging;

pub use logging::{
    InMemoryLogger, LogContext, LogEntry, LogLevel, Logger, NoOpLogger, TracingLogger,
};
