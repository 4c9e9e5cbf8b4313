use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::decoder::FrameDecoder;
use crate::protocol::frame::ChannelId;
use crate::source::{FrameLogSource, FrameSource, NotificationEvent, SourceError};
use crate::{DEFAULT_GENERATED_AT, Report, StreamSummary, make_stub_report};

mod anomalies;
mod channels;
mod timing;

use anomalies::AnomalyStats;
use channels::{ChannelStats, add_reading, build_channel_summaries};
use timing::TimingStats;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

pub fn analyze_log_file(path: &Path) -> Result<Report, AnalysisError> {
    let source = FrameLogSource::open(path)?;
    analyze_source(path, source)
}

/// Replay a recorded stream through a fresh decoder and aggregate the
/// results into a deterministic report.
pub fn analyze_source<S: FrameSource>(
    path: &Path,
    mut source: S,
) -> Result<Report, AnalysisError> {
    let mut decoder = FrameDecoder::new();
    let mut records_total = 0u64;
    let mut first_host_ts = None;
    let mut last_host_ts = None;
    let mut frames_lost = 0u64;
    let mut loss_events = 0u64;
    let mut sequence_first = None;
    let mut sequence_last = None;
    let mut channel_stats: HashMap<ChannelId, ChannelStats> = HashMap::new();
    let mut anomaly_stats = AnomalyStats::new();
    let mut timing = TimingStats::default();

    while let Some(NotificationEvent { ts, data }) = source.next_record()? {
        records_total += 1;
        update_ts_bounds(&mut first_host_ts, &mut last_host_ts, ts);

        match decoder.decode(&data) {
            Ok(frame) => {
                if sequence_first.is_none() {
                    sequence_first = Some(frame.header.sequence);
                }
                sequence_last = Some(frame.header.sequence);
                timing.push(frame.header.timestamp_us);

                if let Some(loss) = frame.loss {
                    frames_lost += loss.lost as u64;
                    loss_events += 1;
                    anomaly_stats.record_loss(&loss, records_total);
                }
                for advisory in &frame.advisories {
                    anomaly_stats.record_advisory(advisory, records_total, frame.header.sequence);
                }
                add_reading(&mut channel_stats, &frame.reading);
            }
            Err(err) => anomaly_stats.record_error(&err, records_total),
        }
    }

    let stats = decoder.stats();
    let mut report = make_stub_report(&path.display().to_string(), path.metadata()?.len());
    report.stream = Some(StreamSummary {
        records_total,
        frames_decoded: stats.frame_count,
        frames_rejected: stats.error_count,
        frames_lost,
        loss_events,
        sequence_first,
        sequence_last,
        duration_s: timing.duration_s(),
        rate_hz: timing.rate_hz(stats.frame_count),
        jitter_ms: timing.jitter_ms(),
        time_start: ts_to_rfc3339(first_host_ts),
        time_end: ts_to_rfc3339(last_host_ts),
    });
    report.generated_at = report
        .stream
        .as_ref()
        .and_then(|stream| stream.time_end.clone().or(stream.time_start.clone()))
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());
    report.channels = build_channel_summaries(channel_stats);
    report.anomalies = anomaly_stats.build_summaries();
    Ok(report)
}

fn update_ts_bounds(first: &mut Option<f64>, last: &mut Option<f64>, ts: Option<f64>) {
    let ts = match ts {
        Some(ts) => ts,
        None => return,
    };
    match first {
        None => *first = Some(ts),
        Some(existing) => {
            if ts < *existing {
                *first = Some(ts);
            }
        }
    }
    match last {
        None => *last = Some(ts),
        Some(existing) => {
            if ts > *existing {
                *last = Some(ts);
            }
        }
    }
}

fn ts_to_rfc3339(ts: Option<f64>) -> Option<String> {
    let ts = ts?;
    let nanos = (ts * 1_000_000_000.0) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}
