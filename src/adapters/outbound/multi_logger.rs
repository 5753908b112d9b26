use super::{init_console_logger, init_file_logger};
use crate::domains::logger::{DomainLogger, DynLogger, LogLevel};
use std::sync::Arc;

/// Sends every message to all of its sinks, in order.
pub struct MultiLogger {
    sinks: Vec<DynLogger>,
}

impl MultiLogger {
    pub fn new(sinks: Vec<DynLogger>) -> Self {
        Self { sinks }
    }
}

impl DomainLogger for MultiLogger {
    fn log(&self, level: LogLevel, msg: &str) {
        for sink in &self.sinks {
            sink.log(level, msg);
        }
    }
}

/// Console output, plus the file at `path` when given and fast_log accepts it.
pub fn init_combined_logger(path: Option<&str>) -> DynLogger {
    let console = init_console_logger();
    let Some(path) = path else { return console };
    match init_file_logger(path) {
        Ok(file) => Arc::new(MultiLogger::new(vec![console, file])),
        Err(e) => {
            console.warn(&format!("{}; continuing without the log file", e));
            console
        }
    }
}
