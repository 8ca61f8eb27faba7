//! Byte layout of a captured feed frame
//!
//! Each captured frame is an Ethernet II frame carrying IPv4 and UDP, with
//! a fixed-size hardware timestamp trailer appended by the capture switch:
//!
//! 1. **Link header** (14 bytes) - destination MAC, source MAC, ether-type at offset 12
//! 2. **IPv4 header** (20-60 bytes) - header length nibble at offset 0, protocol at offset 9
//! 3. **UDP header** (8 bytes) - length field at offset 4 covers header + payload
//! 4. **Sequence number** (4 bytes) - first bytes of the UDP payload
//! 5. **Trailer** (20 bytes) - seconds at offset 8, nanoseconds at offset 12
//!
//! All multi-byte header fields are in network byte order. The sequence
//! number is the exception and is taken in native order.

pub const ETHERNET_HEADER_LEN: usize = 14;
pub const ETHER_TYPE_OFFSET: usize = 12;
pub const ETHER_TYPE_IPV4: u16 = 0x0800;

pub const MIN_IP_HEADER_LEN: usize = 20;
pub const MAX_IP_HEADER_LEN: usize = 60;
pub const IP_PROTOCOL_OFFSET: usize = 9;
pub const IP_PROTOCOL_UDP: u8 = 17;

pub const UDP_HEADER_LEN: usize = 8;
pub const UDP_LENGTH_OFFSET: usize = 4;
pub const SEQUENCE_LEN: usize = 4;
/// UDP header plus the embedded sequence number
pub const MIN_PAYLOAD_LEN: usize = UDP_HEADER_LEN + SEQUENCE_LEN;

pub const TRAILER_LEN: usize = 20;
pub const TRAILER_SECONDS_OFFSET: usize = 8;
pub const TRAILER_NANOSECONDS_OFFSET: usize = 12;

/// Smallest frame that can possibly decode (66 bytes).
pub const MIN_FRAME_LEN: usize =
    ETHERNET_HEADER_LEN + MIN_IP_HEADER_LEN + MIN_PAYLOAD_LEN + TRAILER_LEN;

/// Read a network-order u16. Caller guarantees bounds.
pub(crate) fn be_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

/// Read a network-order u32. Caller guarantees bounds.
pub(crate) fn be_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

/// Read a native-order u32. Caller guarantees bounds.
pub(crate) fn ne_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_ne_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}
