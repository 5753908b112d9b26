use crate::domains::logger::{DomainLogger, DynLogger, LogLevel};
use chrono::Utc;
use std::sync::Arc;

/// Writes through the `log` facade into the fast_log appender.
struct BridgeLogger;

impl DomainLogger for BridgeLogger {
    fn log(&self, level: LogLevel, msg: &str) {
        let stamp = Utc::now().to_rfc3339();
        match level {
            LogLevel::Info => log::info!("{} - {}", stamp, msg),
            LogLevel::Warn => log::warn!("{} - {}", stamp, msg),
            LogLevel::Error => log::error!("{} - {}", stamp, msg),
        }
    }
}

/// Installs fast_log as the `log` backend writing to `path`.
/// Fails if another `log` backend is already installed.
pub fn init_file_logger(path: &str) -> Result<DynLogger, String> {
    fast_log::init(
        fast_log::config::Config::new()
            .file(path)
            .level(log::LevelFilter::Info),
    )
    .map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(BridgeLogger))
}
