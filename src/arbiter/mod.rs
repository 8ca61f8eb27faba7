//! Arbitration engine
//!
//! Drives the two channel sources in lockstep by sequence number and
//! classifies every round:
//!
//! - **drop** - both channels advanced but to different sequences; the
//!   channel that jumped ahead skipped the record the other one delivered
//! - **tie** - both channels advanced to the same sequence; the strictly
//!   earlier timestamp wins and its lead is accumulated
//! - **inconclusive** - at most one channel advanced
//!
//! A channel whose cursor is strictly ahead pauses until the other catches
//! up, so at most one frame per channel is in flight at any time.
//!
//! ## Usage Example
//!
//! ```rust
//! use feedarb::arbiter::arbitrate;
//! use feedarb::sources::MemorySource;
//!
//! let mut lines = Vec::<String>::new();
//! let stats = arbitrate(
//!     MemorySource::new([Vec::<u8>::new()]),
//!     MemorySource::default(),
//!     Some(&mut lines),
//! );
//! assert_eq!(stats.packet_count().a, 0);
//! assert_eq!(lines, vec!["0,not_enough_data".to_string()]);
//! ```

use std::fmt;
use tracing::{debug, info, trace, warn};

use crate::frame::{DecodeError, decode};
use crate::source::FrameSource;
use crate::stats::{Statistics, Tally};
use crate::types::{Channel, ChannelPair, Timestamp};

/// Per-channel read position of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelCursor {
    pub sequence: u32,
    pub timestamp: Timestamp,
    pub read_eligible: bool,
}

impl Default for ChannelCursor {
    fn default() -> Self {
        Self { sequence: 0, timestamp: Timestamp::EPOCH, read_eligible: true }
    }
}

/// What went wrong with a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Decode(DecodeError),
    /// Decoded sequence did not exceed the channel's current one
    OutOfSequence,
}

impl DiagnosticKind {
    pub fn name(self) -> &'static str {
        match self {
            DiagnosticKind::Decode(error) => error.name(),
            DiagnosticKind::OutOfSequence => "out of sequence",
        }
    }
}

/// One per-frame event, rendered as `"<channel index>,<name>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub channel: Channel,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.channel.index(), self.kind.name())
    }
}

/// Receiver for diagnostic lines.
pub trait DiagnosticSink {
    fn emit(&mut self, line: &str);
}

impl<F: FnMut(&str)> DiagnosticSink for F {
    fn emit(&mut self, line: &str) {
        self(line)
    }
}

impl DiagnosticSink for Vec<String> {
    fn emit(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Forwards diagnostics to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, line: &str) {
        warn!(target: "feedarb::diagnostics", "{}", line);
    }
}

/// Arbitration engine over one source per channel
pub struct Arbiter<'s, A, B> {
    sources: (A, B),
    sink: Option<&'s mut dyn DiagnosticSink>,
    cursors: ChannelPair<ChannelCursor>,
    tally: Tally,
    rounds: u64,
}

impl<'s, A: FrameSource, B: FrameSource> Arbiter<'s, A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self {
            sources: (a, b),
            sink: None,
            cursors: ChannelPair::default(),
            tally: Tally::default(),
            rounds: 0,
        }
    }

    /// Route per-frame diagnostics to `sink`. Without a sink they are dropped.
    pub fn with_sink(mut self, sink: &'s mut dyn DiagnosticSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Current cursor of `channel`.
    pub fn cursor(&self, channel: Channel) -> ChannelCursor {
        self.cursors[channel]
    }

    /// Run to joint exhaustion of both sources and return the report.
    pub fn run(mut self) -> Statistics {
        info!("Arbitration started");
        while self.step() {}

        let stats = self.tally.finish();
        info!(
            "Arbitration finished after {} rounds: packets {}, dropped {}, faster {}",
            self.rounds,
            stats.packet_count(),
            stats.dropped_count(),
            stats.faster_count()
        );
        stats
    }

    /// Execute one round. Returns `false` once neither channel delivered a frame.
    pub fn step(&mut self) -> bool {
        let mut fetched = ChannelPair::new(false, false);
        let mut advanced = ChannelPair::new(false, false);

        for channel in Channel::ALL {
            if !self.cursors[channel].read_eligible {
                continue;
            }
            match self.pull(channel) {
                None => {}
                Some(outcome) => {
                    fetched[channel] = true;
                    advanced[channel] = outcome;
                }
            }
        }

        if !fetched.a && !fetched.b {
            debug!("Both channels exhausted after {} rounds", self.rounds);
            return false;
        }
        self.rounds += 1;

        let (a, b) = (self.cursors.a.sequence, self.cursors.b.sequence);
        self.cursors.a.read_eligible = a <= b;
        self.cursors.b.read_eligible = b <= a;

        for channel in Channel::ALL {
            if advanced[channel] {
                self.tally.record_packet(channel);
            }
        }

        if advanced.a && advanced.b {
            self.classify();
        }
        true
    }

    /// Pull and decode one frame. `None` when exhausted, otherwise whether the cursor advanced.
    fn pull(&mut self, channel: Channel) -> Option<bool> {
        let decoded = match channel {
            Channel::A => self.sources.0.next_frame().map(decode),
            Channel::B => self.sources.1.next_frame().map(decode),
        }?;

        let cursor = &mut self.cursors[channel];
        let kind = match decoded {
            Ok(props) if props.sequence > cursor.sequence => {
                trace!("Channel {} advanced {} -> {}", channel, cursor.sequence, props.sequence);
                cursor.sequence = props.sequence;
                cursor.timestamp = props.timestamp;
                return Some(true);
            }
            Ok(props) => {
                trace!("Channel {} regressed {} -> {}", channel, cursor.sequence, props.sequence);
                DiagnosticKind::OutOfSequence
            }
            Err(error) => DiagnosticKind::Decode(error),
        };

        self.report(Diagnostic { channel, kind });
        Some(false)
    }

    /// Both cursors moved this round: record a drop or a tie.
    fn classify(&mut self) {
        let (a, b) = (self.cursors.a, self.cursors.b);
        if a.sequence < b.sequence {
            debug!("Channel B skipped to {} while A delivered {}", b.sequence, a.sequence);
            self.tally.record_drop(Channel::B);
        } else if b.sequence < a.sequence {
            debug!("Channel A skipped to {} while B delivered {}", a.sequence, b.sequence);
            self.tally.record_drop(Channel::A);
        } else if a.timestamp < b.timestamp {
            self.tally.record_win(Channel::A, b.timestamp.saturating_nanos_since(a.timestamp));
        } else if b.timestamp < a.timestamp {
            self.tally.record_win(Channel::B, a.timestamp.saturating_nanos_since(b.timestamp));
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        trace!("Diagnostic: {}", diagnostic);
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(&diagnostic.to_string());
        }
    }
}

/// Arbitrate two sources to exhaustion.
pub fn arbitrate<A: FrameSource, B: FrameSource>(
    a: A,
    b: B,
    sink: Option<&mut dyn DiagnosticSink>,
) -> Statistics {
    let arbiter = Arbiter::new(a, b);
    match sink {
        Some(sink) => arbiter.with_sink(sink).run(),
        None => arbiter.run(),
    }
}
