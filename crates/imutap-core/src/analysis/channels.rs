use std::collections::HashMap;

use crate::ChannelSummary;
use crate::protocol::frame::{ChannelId, ChannelValues, SensorReading};

#[derive(Debug, Default)]
pub(crate) struct ChannelStats {
    pub frames: u64,
    pub components: u64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

impl ChannelStats {
    fn push(&mut self, values: &[f64]) {
        for &value in values {
            if self.components == 0 {
                self.min = value;
                self.max = value;
            } else {
                if value < self.min {
                    self.min = value;
                }
                if value > self.max {
                    self.max = value;
                }
            }
            self.sum += value;
            self.components += 1;
        }
        self.frames += 1;
    }
}

pub(crate) fn add_reading(stats: &mut HashMap<ChannelId, ChannelStats>, reading: &SensorReading) {
    for channel in ChannelId::ALL {
        let Some(values) = reading.channel_values(channel) else {
            continue;
        };
        let entry = stats.entry(channel).or_default();
        match values {
            ChannelValues::Vector(v) => entry.push(&[v.x, v.y, v.z]),
            ChannelValues::Scalar(v) => entry.push(&[v]),
        }
    }
}

pub(crate) fn build_channel_summaries(
    stats: HashMap<ChannelId, ChannelStats>,
) -> Vec<ChannelSummary> {
    let mut channels: Vec<ChannelSummary> = stats
        .into_iter()
        .map(|(channel, stats)| ChannelSummary {
            channel: channel.name().to_string(),
            unit: channel.unit().to_string(),
            frames_count: stats.frames,
            min: stats.min,
            max: stats.max,
            mean: if stats.components > 0 {
                stats.sum / stats.components as f64
            } else {
                0.0
            },
        })
        .collect();

    channels.sort_by(|a, b| a.channel.cmp(&b.channel));
    channels
}
