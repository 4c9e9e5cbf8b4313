use serde::Serialize;

use crate::protocol::frame::{
    Advisory, FrameError, FrameHeader, SensorReading, parse_frame,
};

/// One fully decoded notification, with any non-fatal anomalies.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    pub header: FrameHeader,
    pub reading: SensorReading,
    pub advisories: Vec<Advisory>,
    /// Present when the sequence counter jumped since the last frame.
    pub loss: Option<SequenceLoss>,
}

/// Gap detected in the per-frame sequence counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceLoss {
    pub expected: u32,
    pub actual: u32,
    pub lost: u32,
}

/// Read-only statistics snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecoderStats {
    pub frame_count: u64,
    pub error_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sequence: Option<u32>,
}

/// Stateful per-stream decoder.
///
/// Owns the cross-call state the wire protocol needs: the last seen
/// sequence number for loss detection, and frame/error counters. One
/// instance per logical stream; callers serialize `decode` calls.
///
/// # Examples
/// ```
/// use imutap_core::FrameDecoder;
///
/// let mut decoder = FrameDecoder::new();
/// assert!(decoder.decode(&[0u8; 4]).is_err());
/// assert_eq!(decoder.stats().error_count, 1);
/// ```
#[derive(Debug, Default)]
pub struct FrameDecoder {
    last_sequence: Option<u32>,
    frame_count: u64,
    error_count: u64,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one notification buffer.
    ///
    /// A fatal error increments `error_count` and leaves loss tracking
    /// untouched. A version-valid header always advances
    /// `last_sequence` and increments `frame_count`, regardless of
    /// which advisories fired.
    pub fn decode(&mut self, data: &[u8]) -> Result<DecodedFrame, FrameError> {
        let parsed = match parse_frame(data) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.error_count += 1;
                return Err(err);
            }
        };

        let loss = self.track_sequence(parsed.header.sequence);
        self.frame_count += 1;

        Ok(DecodedFrame {
            header: parsed.header,
            reading: parsed.reading,
            advisories: parsed.advisories,
            loss,
        })
    }

    fn track_sequence(&mut self, sequence: u32) -> Option<SequenceLoss> {
        let loss = self.last_sequence.and_then(|last| {
            let expected = last.wrapping_add(1);
            let lost = sequence.wrapping_sub(expected);
            (lost != 0).then_some(SequenceLoss {
                expected,
                actual: sequence,
                lost,
            })
        });
        self.last_sequence = Some(sequence);
        loss
    }

    pub fn stats(&self) -> DecoderStats {
        DecoderStats {
            frame_count: self.frame_count,
            error_count: self.error_count,
            last_sequence: self.last_sequence,
        }
    }

    /// Zero the counters and forget the last sequence, without tearing
    /// the decoder down mid-session.
    pub fn reset(&mut self) {
        self.last_sequence = None;
        self.frame_count = 0;
        self.error_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::FrameDecoder;

    #[test]
    fn first_frame_never_reports_loss() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.track_sequence(42).is_none());
        assert_eq!(decoder.last_sequence, Some(42));
    }

    #[test]
    fn gap_reports_lost_count() {
        let mut decoder = FrameDecoder::new();
        decoder.track_sequence(100);
        let loss = decoder.track_sequence(103).unwrap();
        assert_eq!(loss.expected, 101);
        assert_eq!(loss.actual, 103);
        assert_eq!(loss.lost, 2);
        assert_eq!(decoder.last_sequence, Some(103));
    }

    #[test]
    fn wraparound_is_not_loss() {
        let mut decoder = FrameDecoder::new();
        decoder.track_sequence(u32::MAX);
        assert!(decoder.track_sequence(0).is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut decoder = FrameDecoder::new();
        decoder.frame_count = 10;
        decoder.error_count = 2;
        decoder.track_sequence(5);
        decoder.reset();
        let stats = decoder.stats();
        assert_eq!(stats.frame_count, 0);
        assert_eq!(stats.error_count, 0);
        assert_eq!(stats.last_sequence, None);
    }
}
