//! Test utilities for building feed frames and capture files
//!
//! This module provides a reference frame, a builder that edits individual
//! header fields of it, and a helper that writes frames out as a pcap file.

#![cfg(any(test, feature = "benchmark"))]

use pcap_file::pcap::{PcapPacket, PcapWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::frame::layout::*;
use crate::types::Timestamp;

/// A well-formed captured frame: 20-byte IPv4 header, 16-byte UDP datagram
/// (8 bytes of payload including the sequence number) and the trailer.
pub const EXAMPLE_FRAME: [u8; 70] = [
    0x01, 0x00, 0x5e, 0x00, 0x1f, 0x01, 0x10, 0x0e, // dst mac, src mac
    0x7e, 0xe7, 0x20, 0x44, 0x08, 0x00, 0x45, 0x00, // ether-type, IPv4
    0x00, 0x80, 0xb7, 0x5f, 0x40, 0x00, 0x3d, 0x11, // protocol = UDP
    0xdb, 0xf3, 0xcd, 0xd1, 0xdd, 0x46, 0xe0, 0x00, //
    0x1f, 0x01, 0x37, 0xe6, 0x37, 0xe6, 0x00, 0x10, // UDP ports, length = 16
    0x00, 0x00, 0xbd, 0x49, 0xb6, 0x01, 0x00, 0x00, // checksum, sequence
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // trailer
    0x00, 0x00, 0x5d, 0x68, 0x06, 0xdc, 0x13, 0x44, // seconds, nanoseconds
    0xb1, 0x46, 0x00, 0x00, 0x00, 0x00,
];

/// Edits header fields of a frame in place.
///
/// Setters panic if the frame is too short for the field they touch.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    data: Vec<u8>,
}

impl FrameBuilder {
    /// Start from [`EXAMPLE_FRAME`].
    pub fn example() -> Self {
        Self { data: EXAMPLE_FRAME.to_vec() }
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn ether_type(mut self, ether_type: u16) -> Self {
        self.data[ETHER_TYPE_OFFSET..ETHER_TYPE_OFFSET + 2]
            .copy_from_slice(&ether_type.to_be_bytes());
        self
    }

    pub fn ip_protocol(mut self, protocol: u8) -> Self {
        self.data[ETHERNET_HEADER_LEN + IP_PROTOCOL_OFFSET] = protocol;
        self
    }

    /// Rewrite the header length nibble without moving any bytes.
    pub fn ip_header_len(mut self, len: usize) -> Self {
        let nibble = ((len / 4) & 0x0F) as u8;
        self.data[ETHERNET_HEADER_LEN] = (self.data[ETHERNET_HEADER_LEN] & 0xF0) | nibble;
        self
    }

    /// Insert `len` bytes of IPv4 options and grow the header length to match.
    pub fn ip_options(mut self, len: usize) -> Self {
        assert_eq!(len % 4, 0, "IPv4 options are a multiple of 4 bytes");
        let header_end = ETHERNET_HEADER_LEN + self.current_ip_header_len();
        let new_len = self.current_ip_header_len() + len;
        self.data.splice(header_end..header_end, std::iter::repeat_n(0u8, len));
        self.ip_header_len(new_len)
    }

    pub fn udp_length(mut self, len: u16) -> Self {
        let offset = self.udp_offset() + UDP_LENGTH_OFFSET;
        self.data[offset..offset + 2].copy_from_slice(&len.to_be_bytes());
        self
    }

    /// Write the sequence number in native byte order.
    pub fn sequence(mut self, sequence: u32) -> Self {
        let offset = self.udp_offset() + UDP_HEADER_LEN;
        self.data[offset..offset + SEQUENCE_LEN].copy_from_slice(&sequence.to_ne_bytes());
        self
    }

    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        let (seconds, nanos) = timestamp.to_parts();
        let trailer = self.udp_offset() + self.current_udp_length();
        let seconds = u32::try_from(seconds).expect("trailer seconds are 32 bits");
        self.data[trailer + TRAILER_SECONDS_OFFSET..trailer + TRAILER_SECONDS_OFFSET + 4]
            .copy_from_slice(&seconds.to_be_bytes());
        self.data[trailer + TRAILER_NANOSECONDS_OFFSET..trailer + TRAILER_NANOSECONDS_OFFSET + 4]
            .copy_from_slice(&nanos.to_be_bytes());
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }

    fn current_ip_header_len(&self) -> usize {
        usize::from(self.data[ETHERNET_HEADER_LEN] & 0x0F) * 4
    }

    fn udp_offset(&self) -> usize {
        ETHERNET_HEADER_LEN + self.current_ip_header_len()
    }

    fn current_udp_length(&self) -> usize {
        usize::from(be_u16(&self.data, self.udp_offset() + UDP_LENGTH_OFFSET))
    }
}

/// Example frame carrying `sequence`, stamped at `timestamp`.
pub fn feed_frame(sequence: u32, timestamp: Timestamp) -> Vec<u8> {
    FrameBuilder::example().sequence(sequence).timestamp(timestamp).build()
}

/// Write `frames` to `path` as a classic pcap file.
pub fn write_capture<P: AsRef<Path>>(path: P, frames: &[Vec<u8>]) -> std::io::Result<PathBuf> {
    let path = path.as_ref().to_path_buf();
    let file = BufWriter::new(File::create(&path)?);
    let mut writer = PcapWriter::new(file).map_err(std::io::Error::other)?;
    for (index, frame) in frames.iter().enumerate() {
        let packet = PcapPacket::new(Duration::from_micros(index as u64), frame.len() as u32, frame);
        writer.write_packet(&packet).map_err(std::io::Error::other)?;
    }
    Ok(path)
}

/// Create an empty scratch directory unique to this process and `label`.
pub fn scratch_dir(label: &str) -> std::io::Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("feedarb-{}-{}", label, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir)?;
    }
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
