use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::layout;
use crate::source::SourceError;

/// Records raw notifications into a `.imulog` capture file.
///
/// Used by recording tooling and test fixtures; the format is the one
/// [`FrameLogSource`](super::FrameLogSource) replays.
pub struct FrameLogWriter {
    writer: BufWriter<File>,
}

impl FrameLogWriter {
    pub fn create(path: &Path) -> Result<Self, SourceError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&layout::MAGIC)?;
        writer.write_all(&layout::FORMAT_VERSION.to_le_bytes())?;
        Ok(Self { writer })
    }

    /// Append one notification. `ts_us` is the host receive time in
    /// microseconds since the Unix epoch, or 0 when unknown.
    pub fn write_record(&mut self, ts_us: u64, data: &[u8]) -> Result<(), SourceError> {
        let len = u16::try_from(data.len()).map_err(|_| {
            SourceError::Format(format!("record too large: {} bytes", data.len()))
        })?;
        self.writer.write_all(&ts_us.to_le_bytes())?;
        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(data)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), SourceError> {
        self.writer.flush()?;
        Ok(())
    }
}
