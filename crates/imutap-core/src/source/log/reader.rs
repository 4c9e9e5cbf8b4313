use std::io::Read;

use super::error::LogSourceError;
use super::layout;

/// Read and validate the file header, returning the format version.
///
/// # Errors
/// Returns `LogSourceError::Io` when the header cannot be read and
/// `LogSourceError::Format` when the magic does not match.
pub fn read_file_header<R: Read>(reader: &mut R) -> Result<u16, LogSourceError> {
    let mut header = [0u8; layout::FILE_HEADER_LEN];
    reader.read_exact(&mut header)?;
    if header[layout::MAGIC_RANGE] != layout::MAGIC {
        return Err(LogSourceError::Format {
            context: "file header",
            message: "bad magic".to_string(),
        });
    }
    let version = u16::from_le_bytes([
        header[layout::FORMAT_VERSION_RANGE.start],
        header[layout::FORMAT_VERSION_RANGE.start + 1],
    ]);
    Ok(version)
}

/// Split a record header into host timestamp and payload length.
pub fn record_fields(header: &[u8; layout::RECORD_HEADER_LEN]) -> (u64, u16) {
    let mut ts_bytes = [0u8; 8];
    ts_bytes.copy_from_slice(&header[layout::RECORD_TS_RANGE]);
    let len = u16::from_le_bytes([
        header[layout::RECORD_LEN_RANGE.start],
        header[layout::RECORD_LEN_RANGE.start + 1],
    ]);
    (u64::from_le_bytes(ts_bytes), len)
}

/// Convert a recorded microsecond timestamp to seconds; zero means
/// "not recorded".
pub fn micros_to_seconds(ts_us: u64) -> Option<f64> {
    if ts_us == 0 {
        return None;
    }
    Some(ts_us as f64 * 1e-6)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{micros_to_seconds, read_file_header, record_fields};
    use crate::source::log::error::LogSourceError;
    use crate::source::log::layout;

    #[test]
    fn file_header_roundtrip() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&layout::MAGIC);
        bytes.extend_from_slice(&layout::FORMAT_VERSION.to_le_bytes());
        let mut cursor = Cursor::new(bytes);
        let version = read_file_header(&mut cursor).unwrap();
        assert_eq!(version, layout::FORMAT_VERSION);
    }

    #[test]
    fn bad_magic_is_format_error() {
        let mut cursor = Cursor::new([b'X', b'X', b'X', b'X', 1, 0]);
        let err = read_file_header(&mut cursor).unwrap_err();
        assert!(matches!(err, LogSourceError::Format { .. }));
    }

    #[test]
    fn truncated_header_is_io_error() {
        let mut cursor = Cursor::new([b'I', b'M', b'U']);
        let err = read_file_header(&mut cursor).unwrap_err();
        assert!(matches!(err, LogSourceError::Io(_)));
    }

    #[test]
    fn record_fields_are_little_endian() {
        let mut header = [0u8; layout::RECORD_HEADER_LEN];
        header[layout::RECORD_TS_RANGE].copy_from_slice(&1_500_000u64.to_le_bytes());
        header[layout::RECORD_LEN_RANGE].copy_from_slice(&20u16.to_le_bytes());
        assert_eq!(record_fields(&header), (1_500_000, 20));
    }

    #[test]
    fn zero_timestamp_means_unrecorded() {
        assert_eq!(micros_to_seconds(0), None);
        let seconds = micros_to_seconds(1_500_000).unwrap();
        assert!((seconds - 1.5).abs() < f64::EPSILON);
    }
}
