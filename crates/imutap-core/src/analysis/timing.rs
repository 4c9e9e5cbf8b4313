/// Device-clock timing over the decoded frames.
///
/// `timestamp_us` is a wrapping 32-bit microsecond counter, so elapsed
/// time accumulates wrapping deltas rather than subtracting endpoints.
/// Jitter follows the usual EWMA with gain 1/16 over inter-arrival
/// differences.
#[derive(Debug, Default)]
pub(crate) struct TimingStats {
    last_ts_us: Option<u32>,
    elapsed_us: u64,
    prev_iat_us: Option<u64>,
    jitter_us: f64,
    jitter_samples: u64,
}

impl TimingStats {
    pub fn push(&mut self, ts_us: u32) {
        if let Some(last) = self.last_ts_us {
            let delta = ts_us.wrapping_sub(last) as u64;
            self.elapsed_us += delta;
            if let Some(prev) = self.prev_iat_us {
                let diff = (delta as f64 - prev as f64).abs();
                self.jitter_us += (diff - self.jitter_us) / 16.0;
                self.jitter_samples += 1;
            }
            self.prev_iat_us = Some(delta);
        }
        self.last_ts_us = Some(ts_us);
    }

    pub fn duration_s(&self) -> Option<f64> {
        if self.elapsed_us == 0 {
            return None;
        }
        Some(self.elapsed_us as f64 * 1e-6)
    }

    pub fn rate_hz(&self, frames: u64) -> Option<f64> {
        let duration = self.duration_s()?;
        if frames < 2 {
            return None;
        }
        Some((frames - 1) as f64 / duration)
    }

    pub fn jitter_ms(&self) -> Option<f64> {
        if self.jitter_samples == 0 {
            return None;
        }
        Some(self.jitter_us * 1e-3)
    }
}

#[cfg(test)]
mod tests {
    use super::TimingStats;

    #[test]
    fn steady_stream_has_zero_jitter() {
        let mut timing = TimingStats::default();
        for i in 0..5u32 {
            timing.push(i * 20_000);
        }
        let duration = timing.duration_s().unwrap();
        assert!((duration - 0.08).abs() < 1e-9);
        let rate = timing.rate_hz(5).unwrap();
        assert!((rate - 50.0).abs() < 1e-6);
        assert_eq!(timing.jitter_ms(), Some(0.0));
    }

    #[test]
    fn single_frame_has_no_metrics() {
        let mut timing = TimingStats::default();
        timing.push(1_000);
        assert_eq!(timing.duration_s(), None);
        assert_eq!(timing.rate_hz(1), None);
        assert_eq!(timing.jitter_ms(), None);
    }

    #[test]
    fn device_clock_wraparound_accumulates() {
        let mut timing = TimingStats::default();
        timing.push(u32::MAX - 9_999);
        timing.push(10_000);
        let duration = timing.duration_s().unwrap();
        assert!((duration - 0.02).abs() < 1e-9);
    }
}
