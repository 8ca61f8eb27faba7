//! Latency and loss comparison of two redundant market data feeds.
//!
//! The same multicast feed is often published on two channels, A and B, so a
//! consumer can take whichever copy arrives first. feedarb replays a capture
//! of each channel, matches frames by sequence number, and reports how often
//! each channel won, by how much, and which records each channel missed.
//!
//! # Features
//!
//! - **Frame decoding**: Ethernet / IPv4 / UDP validation with a
//!   capture-device trailer timestamp
//! - **Arbitration**: lockstep walk over both channels by sequence number
//! - **Diagnostics**: per-frame problems reported as `<channel>,<name>` lines
//! - **Reports**: text layout for terminals, YAML for tooling
//!
//! ## Example
//!
//! ```rust,no_run
//! use feedarb::FeedArb;
//! use feedarb::config::AnalysisConfig;
//!
//! fn main() -> feedarb::Result<()> {
//!     let stats = FeedArb::analyze("/captures/2019-08-29", &AnalysisConfig::default(), None)?;
//!     println!("{}", stats);
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Decoding and arbitration
pub mod arbiter;
pub mod frame;
pub mod source;
pub mod sources;
pub mod stats;

// Setup
pub mod config;
pub mod inputs;

// Core exports
pub use error::*;
pub use types::*;

pub use arbiter::{Arbiter, DiagnosticSink, TracingSink, arbitrate};
pub use frame::{DecodeError, decode};
pub use source::FrameSource;
pub use stats::Statistics;

use std::path::Path;
use tracing::info;

use config::AnalysisConfig;
use sources::CaptureSource;

/// Unified entry point for analysing a capture directory.
///
/// Runs every stage in order: discovery, channel assignment, opening both
/// captures, arbitration. The first failing stage determines the error, and
/// with it the exit code of the `feedarb` binary.
pub struct FeedArb;

impl FeedArb {
    /// Analyse the two captures found in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `dir` is missing, not a directory, or does not hold exactly two regular files
    /// - The file names do not carry one tag per channel
    /// - A capture cannot be opened or has no valid pcap header
    ///
    /// Problems with individual frames are not errors; they go to `sink`.
    pub fn analyze<P: AsRef<Path>>(
        dir: P,
        config: &AnalysisConfig,
        sink: Option<&mut dyn DiagnosticSink>,
    ) -> Result<Statistics> {
        let files = inputs::find_inputs(dir)?;
        let channels = inputs::sort_channels(&files, config)?;
        let sources = Self::open(&channels)?;

        let stats = arbitrate(sources.a, sources.b, sink);
        info!("Analysis complete");
        Ok(stats)
    }

    /// Open the capture of each channel.
    pub fn open(paths: &ChannelPair<impl AsRef<Path>>) -> Result<ChannelPair<CaptureSource>> {
        let a = CaptureSource::open(Channel::A, &paths.a)?;
        let b = CaptureSource::open(Channel::B, &paths.b)?;
        Ok(ChannelPair::new(a, b))
    }
}
