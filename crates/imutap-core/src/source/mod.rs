mod log;

pub use log::{FrameLogSource, FrameLogWriter};

use thiserror::Error;

/// One raw notification buffer as delivered by the transport.
#[derive(Debug, Clone)]
pub struct NotificationEvent {
    /// Host receive time in seconds since the Unix epoch, when recorded.
    pub ts: Option<f64>,
    pub data: Vec<u8>,
}

/// Supplier of raw notification buffers, one per decode call.
pub trait FrameSource {
    fn next_record(&mut self) -> Result<Option<NotificationEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("capture log error: {0}")]
    Format(String),
}

impl From<log::error::LogSourceError> for SourceError {
    fn from(value: log::error::LogSourceError) -> Self {
        match value {
            log::error::LogSourceError::Io(err) => SourceError::Io(err),
            log::error::LogSourceError::Format { context, message } => {
                SourceError::Format(format!("{context}: {message}"))
            }
        }
    }
}
