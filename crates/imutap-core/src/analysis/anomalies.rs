use std::collections::HashMap;

use crate::AnomalySummary;
use crate::decoder::SequenceLoss;
use crate::protocol::frame::{Advisory, FrameError};

const MAX_EXAMPLES: usize = 3;

pub(crate) const SEVERITY_ERROR: &str = "error";
pub(crate) const SEVERITY_WARNING: &str = "warning";

/// Aggregates decode errors, advisories, and sequence losses under
/// stable anomaly IDs with up to three example contexts each.
#[derive(Debug, Default)]
pub(crate) struct AnomalyStats {
    entries: HashMap<&'static str, AnomalyEntry>,
}

#[derive(Debug)]
struct AnomalyEntry {
    severity: &'static str,
    message: &'static str,
    count: u64,
    examples: Vec<String>,
}

impl AnomalyStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_error(&mut self, err: &FrameError, record: u64) {
        let (id, message) = match err {
            FrameError::TooShort { .. } => (
                "IMU-HEADER-TOO-SHORT",
                "frame shorter than the 14-byte header",
            ),
            FrameError::UnsupportedVersion { .. } => {
                ("IMU-HEADER-VERSION", "unsupported protocol version")
            }
        };
        self.record(id, SEVERITY_ERROR, message, format!("record {record}: {err}"));
    }

    pub fn record_advisory(&mut self, advisory: &Advisory, record: u64, sequence: u32) {
        let (id, message) = match advisory {
            Advisory::LengthMismatch { .. } => (
                "IMU-HEADER-LENGTH",
                "declared frame length disagrees with received byte count",
            ),
            Advisory::TlvOverflow { .. } => (
                "IMU-TLV-OVERFLOW",
                "TLV record claims more bytes than remain in the payload",
            ),
            Advisory::UnknownTlvType { .. } => ("IMU-TLV-UNKNOWN-TYPE", "unknown TLV type"),
            Advisory::TlvLengthMismatch { .. } => (
                "IMU-TLV-LENGTH",
                "TLV record length does not match its type",
            ),
        };
        self.record(
            id,
            SEVERITY_WARNING,
            message,
            format!("record {record}, seq={sequence}: {advisory}"),
        );
    }

    pub fn record_loss(&mut self, loss: &SequenceLoss, record: u64) {
        self.record(
            "IMU-SEQ-LOSS",
            SEVERITY_WARNING,
            "sequence gap indicates lost frames",
            format!(
                "record {record}: {} frame(s) lost, expected seq={}, got {}",
                loss.lost, loss.expected, loss.actual
            ),
        );
    }

    fn record(&mut self, id: &'static str, severity: &'static str, message: &'static str, example: String) {
        let entry = self.entries.entry(id).or_insert_with(|| AnomalyEntry {
            severity,
            message,
            count: 0,
            examples: Vec::new(),
        });
        entry.count += 1;
        if entry.examples.len() < MAX_EXAMPLES {
            entry.examples.push(example);
        }
    }

    pub fn build_summaries(self) -> Vec<AnomalySummary> {
        let mut anomalies: Vec<AnomalySummary> = self
            .entries
            .into_iter()
            .map(|(id, entry)| AnomalySummary {
                id: id.to_string(),
                severity: entry.severity.to_string(),
                message: entry.message.to_string(),
                count: entry.count,
                examples: entry.examples,
            })
            .collect();

        anomalies.sort_by(|a, b| a.id.cmp(&b.id));
        anomalies
    }
}

#[cfg(test)]
mod tests {
    use super::AnomalyStats;
    use crate::protocol::frame::{Advisory, FrameError};

    #[test]
    fn summaries_are_sorted_and_capped_at_three_examples() {
        let mut stats = AnomalyStats::new();
        for record in 1..=5 {
            stats.record_advisory(&Advisory::UnknownTlvType { tlv_type: 0xEE }, record, record as u32);
        }
        stats.record_error(
            &FrameError::TooShort {
                needed: 14,
                actual: 3,
            },
            6,
        );

        let summaries = stats.build_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "IMU-HEADER-TOO-SHORT");
        assert_eq!(summaries[0].severity, "error");
        assert_eq!(summaries[1].id, "IMU-TLV-UNKNOWN-TYPE");
        assert_eq!(summaries[1].count, 5);
        assert_eq!(summaries[1].examples.len(), 3);
        assert!(summaries[1].examples[0].contains("record 1"));
    }
}
