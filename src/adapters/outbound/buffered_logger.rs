use crate::domains::logger::{DomainLogger, DynLogger, LogLevel};
use std::sync::Arc;
use tokio::sync::mpsc;

struct LogMessage {
    level: LogLevel,
    msg: String,
}

struct BufferedLogger {
    sender: mpsc::Sender<LogMessage>,
}

impl DomainLogger for BufferedLogger {
    fn log(&self, level: LogLevel, msg: &str) {
        // Non-blocking: dropped when the buffer is full.
        let _ = self.sender.try_send(LogMessage { level, msg: msg.to_string() });
    }
}

/// Moves logging off the request path. Messages are forwarded to `sink` from a
/// background task; `capacity` bounds the queue. Must be called inside a tokio
/// runtime.
pub fn init_buffered_logger(sink: DynLogger, capacity: usize) -> DynLogger {
    let (sender, mut receiver) = mpsc::channel::<LogMessage>(capacity.max(1));
    tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            sink.log(message.level, &message.msg);
        }
    });
    Arc::new(BufferedLogger { sender })
}
