//! Decoded frame properties

use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Identity and capture time of one successfully decoded frame.
///
/// This is the only data the arbitration engine keeps from a frame;
/// the raw bytes are dropped as soon as decoding returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameProperties {
    /// Application-level sequence number embedded in the payload
    pub sequence: u32,

    /// Hardware timestamp from the capture trailer
    pub timestamp: Timestamp,
}

impl FrameProperties {
    pub const fn new(sequence: u32, timestamp: Timestamp) -> Self {
        Self { sequence, timestamp }
    }
}
