use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::layout;
use super::reader;
use crate::source::{FrameSource, NotificationEvent, SourceError};

/// Replays recorded notifications from a `.imulog` capture file.
pub struct FrameLogSource {
    reader: BufReader<File>,
}

impl FrameLogSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        let mut buf = BufReader::new(file);
        let version = reader::read_file_header(&mut buf)?;
        if version != layout::FORMAT_VERSION {
            return Err(SourceError::Format(format!(
                "unsupported capture log version: {version}"
            )));
        }
        Ok(Self { reader: buf })
    }

    /// Read a full record header, distinguishing clean end-of-file
    /// from a truncated record.
    fn read_record_header(
        &mut self,
    ) -> Result<Option<[u8; layout::RECORD_HEADER_LEN]>, SourceError> {
        let mut header = [0u8; layout::RECORD_HEADER_LEN];
        let mut filled = 0;
        while filled < header.len() {
            let n = self.reader.read(&mut header[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        match filled {
            0 => Ok(None),
            n if n == header.len() => Ok(Some(header)),
            _ => Err(SourceError::Format("truncated record header".to_string())),
        }
    }
}

impl FrameSource for FrameLogSource {
    fn next_record(&mut self) -> Result<Option<NotificationEvent>, SourceError> {
        let Some(header) = self.read_record_header()? else {
            return Ok(None);
        };
        let (ts_us, len) = reader::record_fields(&header);

        let mut data = vec![0u8; len as usize];
        self.reader.read_exact(&mut data).map_err(|err| {
            if err.kind() == std::io::ErrorKind::UnexpectedEof {
                SourceError::Format("truncated record payload".to_string())
            } else {
                SourceError::Io(err)
            }
        })?;

        Ok(Some(NotificationEvent {
            ts: reader::micros_to_seconds(ts_us),
            data,
        }))
    }
}
