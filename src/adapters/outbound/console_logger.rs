use crate::domains::logger::{DomainLogger, DynLogger, LogLevel};
use std::sync::Arc;

/// Forwards to the process-wide `tracing` subscriber.
struct ConsoleBridge;

impl DomainLogger for ConsoleBridge {
    fn log(&self, level: LogLevel, msg: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: "coverage", "{}", msg),
            LogLevel::Warn => tracing::warn!(target: "coverage", "{}", msg),
            LogLevel::Error => tracing::error!(target: "coverage", "{}", msg),
        }
    }
}

/// Console logger backed by tracing; also the fallback when no log file is set.
pub fn init_console_logger() -> DynLogger {
    Arc::new(ConsoleBridge)
}
