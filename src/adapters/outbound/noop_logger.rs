use crate::domains::logger::{DomainLogger, DynLogger, LogLevel};
use std::sync::Arc;

struct NoOp;

impl DomainLogger for NoOp {
    fn log(&self, _level: LogLevel, _msg: &str) {}
}

/// No-op logger useful as default in unit tests
pub fn init_noop_logger() -> DynLogger {
    Arc::new(NoOp)
}
