use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogSourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("capture log error ({context}): {message}")]
    Format {
        context: &'static str,
        message: String,
    },
}
