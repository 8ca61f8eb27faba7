//! Arbitration statistics
//!
//! [`Tally`] accumulates counts while the engine runs; [`Tally::finish`]
//! turns it into the immutable [`Statistics`] report.

use serde::Serialize;
use std::fmt;

use crate::types::{Channel, ChannelPair};

/// Final report of one arbitration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Statistics {
    packet_count: ChannelPair<u64>,
    dropped_count: ChannelPair<u64>,
    faster_count: ChannelPair<u64>,
    advantage_total_ns: ChannelPair<f64>,
}

impl Statistics {
    /// Frames on each channel that advanced its cursor.
    pub fn packet_count(&self) -> ChannelPair<u64> {
        self.packet_count
    }

    /// Records each channel missed that the other channel delivered.
    pub fn dropped_count(&self) -> ChannelPair<u64> {
        self.dropped_count
    }

    /// Sequence-matched pairs each channel delivered strictly first.
    pub fn faster_count(&self) -> ChannelPair<u64> {
        self.faster_count
    }

    /// Sum of nanosecond leads over all pairs each channel won.
    pub fn advantage_total_ns(&self) -> ChannelPair<f64> {
        self.advantage_total_ns
    }

    /// Mean lead per won pair; exactly `0.0` for a channel that never won.
    pub fn average_advantage_ns(&self) -> ChannelPair<f64> {
        self.advantage_total_ns.map(|channel, total| {
            total / self.faster_count[channel].max(1) as f64
        })
    }

    /// Serialize the report, including averages, as YAML.
    pub fn to_yaml(&self) -> crate::Result<String> {
        #[derive(Serialize)]
        struct Rendered<'a> {
            #[serde(flatten)]
            stats: &'a Statistics,
            average_advantage_ns: ChannelPair<f64>,
        }

        serde_yaml_ng::to_string(&Rendered { stats: self, average_advantage_ns: self.average_advantage_ns() })
            .map_err(|e| crate::ArbError::config("Report rendering", e.to_string()))
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "packet count: {}", self.packet_count)?;
        writeln!(f, "dropped packets count: {}", self.dropped_count)?;
        writeln!(f, "faster packets count: {}", self.faster_count)?;
        write!(f, "average advantage in ns: {}", self.average_advantage_ns())
    }
}

/// In-progress statistics, mutated only by the arbitration engine.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    stats: Statistics,
}

impl Tally {
    pub(crate) fn record_packet(&mut self, channel: Channel) {
        self.stats.packet_count[channel] += 1;
    }

    pub(crate) fn record_drop(&mut self, channel: Channel) {
        self.stats.dropped_count[channel] += 1;
    }

    pub(crate) fn record_win(&mut self, winner: Channel, advantage_ns: u64) {
        self.stats.faster_count[winner] += 1;
        self.stats.advantage_total_ns[winner] += advantage_ns as f64;
    }

    pub(crate) fn finish(self) -> Statistics {
        self.stats
    }
}

#[cfg(test)]
impl Statistics {
    pub(crate) fn from_parts(
        packet_count: ChannelPair<u64>,
        dropped_count: ChannelPair<u64>,
        faster_count: ChannelPair<u64>,
        advantage_total_ns: ChannelPair<f64>,
    ) -> Self {
        Self { packet_count, dropped_count, faster_count, advantage_total_ns }
    }
}
