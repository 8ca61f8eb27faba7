//! Nanosecond-resolution capture timestamps

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Point in time as nanoseconds since the Unix epoch.
///
/// The default value is the epoch itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0);

    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Build from a seconds/nanoseconds pair as stored in a capture trailer.
    ///
    /// `nanoseconds` is not required to be below one second; it is simply added.
    pub const fn from_parts(seconds: u32, nanoseconds: u32) -> Self {
        Self(seconds as u64 * NANOS_PER_SEC + nanoseconds as u64)
    }

    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// Split into whole seconds and the sub-second remainder.
    pub const fn to_parts(self) -> (u64, u32) {
        (self.0 / NANOS_PER_SEC, (self.0 % NANOS_PER_SEC) as u32)
    }

    /// Nanoseconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn saturating_nanos_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn to_system_time(self) -> SystemTime {
        UNIX_EPOCH + Duration::from_nanos(self.0)
    }
}

impl std::ops::Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs.as_nanos().min(u64::MAX as u128) as u64))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (secs, nanos) = self.to_parts();
        write!(f, "{secs}.{nanos:09}")
    }
}
