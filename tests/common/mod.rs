//! Fixtures shared by the integration tests.
//!
//! Writes real pcap captures into a scratch directory laid out the way the
//! capture appliance names its files.

#![allow(dead_code)]

use pcap_file::pcap::{PcapPacket, PcapWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Frame from a real feed capture: sequence `0x01b649bd`, trailer
/// timestamp `0x5d6806dc.0x1344b146`.
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

const SEQUENCE_OFFSET: usize = 42;
const NANOSECONDS_OFFSET: usize = 62;

/// Example frame with its sequence (native order) and trailer nanoseconds replaced.
pub fn frame(sequence: u32, nanoseconds: u32) -> Vec<u8> {
    let mut data = EXAMPLE_FRAME.to_vec();
    data[SEQUENCE_OFFSET..SEQUENCE_OFFSET + 4].copy_from_slice(&sequence.to_ne_bytes());
    data[NANOSECONDS_OFFSET..NANOSECONDS_OFFSET + 4].copy_from_slice(&nanoseconds.to_be_bytes());
    data
}

/// Fresh, empty directory for one test.
pub fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("feedarb-it-{}-{}", label, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("Failed to clear scratch directory");
    }
    std::fs::create_dir_all(&dir).expect("Failed to create scratch directory");
    dir
}

/// Write `frames` as a classic pcap file.
pub fn write_capture(path: &Path, frames: &[Vec<u8>]) {
    let file = BufWriter::new(File::create(path).expect("Failed to create capture"));
    let mut writer = PcapWriter::new(file).expect("Failed to write pcap header");
    for (index, data) in frames.iter().enumerate() {
        let packet = PcapPacket::new(Duration::from_micros(index as u64), data.len() as u32, data);
        writer.write_packet(&packet).expect("Failed to write packet");
    }
}

/// Directory holding one capture per channel with the default tags.
pub fn capture_dir(label: &str, a: &[Vec<u8>], b: &[Vec<u8>]) -> PathBuf {
    let dir = scratch_dir(label);
    write_capture(&dir.join("feed_14310-0.pcap"), a);
    write_capture(&dir.join("feed_15310-0.pcap"), b);
    dir
}
