//! Imutap core library for decoding multi-sensor IMU BLE streams.
//!
//! This crate implements the frame decoder used by the CLI and by live
//! integrations: a transport delivers one raw notification buffer per
//! call, and the decoder validates the 14-byte header, tracks sequence
//! losses, and walks the TLV payload into typed, physically-scaled
//! readings. Capture-log sources feed the analysis layer, which drives
//! the same decoder offline and aggregates results into a
//! deterministic, versioned report.
//!
//! Invariants:
//! - Decoding is a bounded, synchronous transform; all I/O is isolated
//!   in `source` modules.
//! - Every version-valid header advances loss tracking and the frame
//!   counter exactly once; every rejected frame increments the error
//!   counter exactly once.
//! - Non-fatal anomalies are returned as advisories on the result,
//!   never as side effects.
//! - Report outputs are deterministic and stable across runs.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use imutap_core::analyze_log_file;
//!
//! let report = analyze_log_file(Path::new("session.imulog"))?;
//! println!("report version: {}", report.report_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
mod decoder;
mod protocol;
mod source;

pub use analysis::{AnalysisError, analyze_log_file, analyze_source};
pub use decoder::{DecodedFrame, DecoderStats, FrameDecoder, SequenceLoss};
pub use protocol::frame::{
    Advisory, ChannelId, ChannelValues, FrameError, FrameHeader, ParsedFrame, SensorReading,
    Vector3, parse_frame, parse_header,
};
pub use source::{FrameLogSource, FrameLogWriter, FrameSource, NotificationEvent, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no capture time is available.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Aggregated analysis report with deterministic ordering.
///
/// # Examples
/// ```
/// use imutap_core::make_stub_report;
///
/// let report = make_stub_report("session.imulog", 123);
/// assert_eq!(report.report_version, imutap_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,

    /// Input capture metadata.
    pub input: InputInfo,

    /// Stream-level summary (absent only for an unreadable stream).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<StreamSummary>,
    /// Per-channel summaries in stable order.
    pub channels: Vec<ChannelSummary>,
    /// Anomaly summaries in stable order.
    pub anomalies: Vec<AnomalySummary>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "imutap").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input capture metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Stream-level metrics over one capture.
///
/// Sequence metrics cover decoded frames only; timing metrics come
/// from the device-local microsecond clock, host timestamps from the
/// capture records.
///
/// # Examples
/// ```
/// use imutap_core::StreamSummary;
///
/// let stream = StreamSummary {
///     records_total: 10,
///     frames_decoded: 9,
///     frames_rejected: 1,
///     frames_lost: 0,
///     loss_events: 0,
///     sequence_first: Some(1),
///     sequence_last: Some(9),
///     duration_s: None,
///     rate_hz: None,
///     jitter_ms: None,
///     time_start: None,
///     time_end: None,
/// };
/// assert_eq!(stream.frames_decoded, 9);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSummary {
    /// Total notification records observed in the capture.
    pub records_total: u64,
    /// Frames decoded successfully.
    pub frames_decoded: u64,
    /// Frames rejected with a fatal decode error.
    pub frames_rejected: u64,
    /// Total frames lost across all sequence gaps.
    pub frames_lost: u64,
    /// Number of distinct sequence gaps.
    pub loss_events: u64,
    /// First decoded sequence number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_first: Option<u32>,
    /// Last decoded sequence number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_last: Option<u32>,
    /// Device-clock duration of the stream in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_s: Option<f64>,
    /// Mean frame rate in Hz, when at least two frames decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_hz: Option<f64>,
    /// Inter-arrival jitter in milliseconds (device clock, EWMA).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter_ms: Option<f64>,
    /// RFC3339 host timestamp of the first record (if recorded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    /// RFC3339 host timestamp of the last record (if recorded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
}

/// Summary of one sensor channel observed in the stream.
///
/// # Examples
/// ```
/// use imutap_core::ChannelSummary;
///
/// let channel = ChannelSummary {
///     channel: "gyro".to_string(),
///     unit: "dps".to_string(),
///     frames_count: 42,
///     min: -1.5,
///     max: 2.0,
///     mean: 0.1,
/// };
/// assert_eq!(channel.channel, "gyro");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSummary {
    /// Channel name (e.g., "accel_wide", "gyro").
    pub channel: String,
    /// Physical unit of the channel's values.
    pub unit: String,
    /// Number of frames that reported this channel.
    pub frames_count: u64,
    /// Minimum over all sample components.
    pub min: f64,
    /// Maximum over all sample components.
    pub max: f64,
    /// Mean over all sample components.
    pub mean: f64,
}

/// Single anomaly record aggregated by stable ID.
///
/// # Examples
/// ```
/// use imutap_core::AnomalySummary;
///
/// let anomaly = AnomalySummary {
///     id: "IMU-HEADER-TOO-SHORT".to_string(),
///     severity: "error".to_string(),
///     message: "frame shorter than the 14-byte header".to_string(),
///     count: 1,
///     examples: vec!["record 3: frame too short: need 14 bytes, got 7".to_string()],
/// };
/// assert_eq!(anomaly.count, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalySummary {
    /// Stable anomaly identifier (e.g., `IMU-TLV-OVERFLOW`).
    pub id: String,
    /// Severity label (`error` or `warning`).
    pub severity: String,
    /// Human-readable message explaining the anomaly.
    pub message: String,
    /// Number of occurrences aggregated into this anomaly.
    pub count: u64,
    /// At most three example contexts, formatted as `record N, seq=S: ...`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use imutap_core::make_stub_report;
///
/// let report = make_stub_report("session.imulog", 123);
/// assert!(report.channels.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "imutap".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        stream: None,
        channels: vec![],
        anomalies: vec![],
    }
}
