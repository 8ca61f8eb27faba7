//! Capture file frame source
//!
//! Reads classic pcap files frame by frame through the `pcap-file` crate.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use feedarb::{Channel, FrameSource};
//! use feedarb::sources::CaptureSource;
//!
//! fn count_frames() -> feedarb::Result<()> {
//!     let mut source = CaptureSource::open(Channel::A, "feed_14310-0.pcap")?;
//!     let mut frames = 0;
//!     while let Some(frame) = source.next_frame() {
//!         frames += 1;
//!         println!("frame of {} bytes", frame.len());
//!     }
//!     println!("{} frames", frames);
//!     Ok(())
//! }
//! ```

use pcap_file::pcap::PcapReader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

use crate::source::FrameSource;
use crate::types::Channel;
use crate::{ArbError, Result};

/// Frame source backed by a pcap capture
pub struct CaptureSource<R: Read = BufReader<File>> {
    reader: PcapReader<R>,
    channel: Channel,
    path: PathBuf,
    buffer: Vec<u8>,
    frames_read: u64,
    exhausted: bool,
}

impl CaptureSource {
    /// Open a capture file for `channel`.
    pub fn open<P: AsRef<Path>>(channel: Channel, path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| ArbError::CaptureOpen {
            channel,
            path: path.clone(),
            source,
        })?;

        let source = Self::from_reader(channel, BufReader::new(file), path)?;
        info!("Opened capture for channel {}: {}", channel, source.path.display());
        Ok(source)
    }
}

impl<R: Read> CaptureSource<R> {
    /// Wrap any reader producing pcap data, with `path` for error context.
    pub fn from_reader(channel: Channel, reader: R, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let reader = PcapReader::new(reader).map_err(|source| ArbError::CaptureFormat {
            channel,
            path: path.clone(),
            source,
        })?;

        debug!("Capture header for channel {}: {:?}", channel, reader.header());

        Ok(Self { reader, channel, path, buffer: Vec::new(), frames_read: 0, exhausted: false })
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of frames delivered so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl<R: Read> FrameSource for CaptureSource<R> {
    fn next_frame(&mut self) -> Option<&[u8]> {
        if self.exhausted {
            return None;
        }

        match self.reader.next_packet() {
            Some(Ok(packet)) => {
                if (packet.data.len() as u64) < u64::from(packet.orig_len) {
                    trace!(
                        "Channel {} frame {} truncated by capture: {} of {} bytes",
                        self.channel,
                        self.frames_read,
                        packet.data.len(),
                        packet.orig_len
                    );
                }
                self.buffer.clear();
                self.buffer.extend_from_slice(&packet.data);
            }
            Some(Err(e)) => {
                warn!(
                    "Stopping channel {} at frame {} of {}: {}",
                    self.channel,
                    self.frames_read,
                    self.path.display(),
                    e
                );
                self.exhausted = true;
                return None;
            }
            None => {
                debug!("Channel {} exhausted after {} frames", self.channel, self.frames_read);
                self.exhausted = true;
                return None;
            }
        }

        self.frames_read += 1;
        Some(self.buffer.as_slice())
    }
}
