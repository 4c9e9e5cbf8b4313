use thiserror::Error;

/// Fatal frame decode errors.
///
/// Only conditions that make the whole frame unusable are errors; every
/// other anomaly is reported as an [`Advisory`](super::Advisory) on the
/// decode result.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("unsupported protocol version: {version}")]
    UnsupportedVersion { version: u8 },
}
