//! Frame decoding
//!
//! Validation runs layer by layer; each stage either rejects the frame with
//! a [`DecodeError`] or hands the value it derived to the next stage.

use thiserror::Error;
use tracing::trace;

use super::layout::*;
use crate::types::{FrameProperties, Timestamp};

/// Why a captured frame could not be decoded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeError {
    #[error("not enough data")]
    TooShort,

    #[error("not IPv4")]
    NotIPv4,

    #[error("not UDP")]
    NotUDP,

    #[error("bad IP header")]
    BadIPHeader,

    #[error("bad UDP header")]
    BadUDPHeader,
}

impl DecodeError {
    /// Canonical name used in diagnostic lines.
    pub fn name(self) -> &'static str {
        match self {
            DecodeError::TooShort => "not_enough_data",
            DecodeError::NotIPv4 => "not_ipv4",
            DecodeError::NotUDP => "not_udp",
            DecodeError::BadIPHeader => "bad_ip_header",
            DecodeError::BadUDPHeader => "bad_udp_header",
        }
    }
}

/// Decode one captured frame into its sequence number and trailer timestamp.
///
/// Pure and allocation free; safe to call from any thread.
///
/// ```rust
/// use feedarb::frame::{DecodeError, decode};
///
/// assert_eq!(decode(&[0u8; 10]), Err(DecodeError::TooShort));
/// ```
pub fn decode(data: &[u8]) -> Result<FrameProperties, DecodeError> {
    check_link(data)?;
    let ip_header_len = check_network(data)?;
    let payload_len = check_transport(data, ip_header_len)?;
    let properties = extract(data, ip_header_len, payload_len);

    trace!(
        "Decoded frame: len={}, sequence={}, timestamp={}",
        data.len(),
        properties.sequence,
        properties.timestamp
    );
    Ok(properties)
}

/// Minimum length and Ethernet ether-type.
fn check_link(data: &[u8]) -> Result<(), DecodeError> {
    if data.len() < MIN_FRAME_LEN {
        return Err(DecodeError::TooShort);
    }
    if be_u16(data, ETHER_TYPE_OFFSET) != ETHER_TYPE_IPV4 {
        return Err(DecodeError::NotIPv4);
    }
    Ok(())
}

/// Protocol and header length of the IPv4 header. Returns the header length.
fn check_network(data: &[u8]) -> Result<usize, DecodeError> {
    let ip_header = &data[ETHERNET_HEADER_LEN..];
    let ip_header_len = usize::from(ip_header[0] & 0x0F) * 4;
    if ip_header[IP_PROTOCOL_OFFSET] != IP_PROTOCOL_UDP {
        return Err(DecodeError::NotUDP);
    }

    if !(MIN_IP_HEADER_LEN..=MAX_IP_HEADER_LEN).contains(&ip_header_len)
        || data.len() < ETHERNET_HEADER_LEN + ip_header_len + MIN_PAYLOAD_LEN + TRAILER_LEN
    {
        return Err(DecodeError::BadIPHeader);
    }
    Ok(ip_header_len)
}

/// UDP length field against the exact frame size. Returns the UDP length.
fn check_transport(data: &[u8], ip_header_len: usize) -> Result<usize, DecodeError> {
    let udp_offset = ETHERNET_HEADER_LEN + ip_header_len;
    let payload_len = usize::from(be_u16(data, udp_offset + UDP_LENGTH_OFFSET));
    if payload_len < MIN_PAYLOAD_LEN
        || data.len() != ETHERNET_HEADER_LEN + ip_header_len + payload_len + TRAILER_LEN
    {
        return Err(DecodeError::BadUDPHeader);
    }
    Ok(payload_len)
}

fn extract(data: &[u8], ip_header_len: usize, payload_len: usize) -> FrameProperties {
    let udp_offset = ETHERNET_HEADER_LEN + ip_header_len;
    // Native order: the feed writes this field without byte swapping.
    let sequence = ne_u32(data, udp_offset + UDP_HEADER_LEN);

    let trailer = udp_offset + payload_len;
    let seconds = be_u32(data, trailer + TRAILER_SECONDS_OFFSET);
    let nanoseconds = be_u32(data, trailer + TRAILER_NANOSECONDS_OFFSET);

    FrameProperties { sequence, timestamp: Timestamp::from_parts(seconds, nanoseconds) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{EXAMPLE_FRAME, FrameBuilder};

    #[test]
    fn example_frame_decodes() {
        let props = decode(&EXAMPLE_FRAME).expect("example frame should decode");
        assert_eq!(props.sequence, u32::from_ne_bytes([0xbd, 0x49, 0xb6, 0x01]));
        assert_eq!(props.timestamp, Timestamp::from_parts(0x5d68_06dc, 0x1344_b146));
    }

    #[test]
    fn builder_values_are_read_back() {
        let ts = Timestamp::from_parts(1_700_000_000, 999_999_999);
        let frame = FrameBuilder::example().sequence(42).timestamp(ts).build();
        assert_eq!(decode(&frame), Ok(FrameProperties::new(42, ts)));
    }

    #[test]
    fn empty_and_short_frames() {
        assert_eq!(decode(&[]), Err(DecodeError::TooShort));
        assert_eq!(decode(&EXAMPLE_FRAME[..MIN_FRAME_LEN - 1]), Err(DecodeError::TooShort));
    }

    #[test]
    fn not_ipv4() {
        let frame = FrameBuilder::example().ether_type(0x0806).build();
        assert_eq!(decode(&frame), Err(DecodeError::NotIPv4));
    }

    #[test]
    fn not_udp() {
        let frame = FrameBuilder::example().ip_protocol(6).build();
        assert_eq!(decode(&frame), Err(DecodeError::NotUDP));
    }

    #[test]
    fn protocol_is_checked_before_header_length() {
        let frame = FrameBuilder::example().ip_protocol(6).ip_header_len(8).build();
        assert_eq!(decode(&frame), Err(DecodeError::NotUDP));
    }

    #[test]
    fn ip_header_too_small() {
        let frame = FrameBuilder::example().ip_header_len(8).build();
        assert_eq!(decode(&frame), Err(DecodeError::BadIPHeader));
    }

    #[test]
    fn ip_header_longer_than_frame_allows() {
        let frame = FrameBuilder::example().ip_header_len(60).build();
        assert_eq!(decode(&frame), Err(DecodeError::BadIPHeader));
    }

    #[test]
    fn ip_options_shift_every_offset() {
        let ts = Timestamp::from_parts(10, 20);
        let frame = FrameBuilder::example().ip_options(8).sequence(9).timestamp(ts).build();
        assert_eq!(frame.len(), EXAMPLE_FRAME.len() + 8);
        assert_eq!(decode(&frame), Ok(FrameProperties::new(9, ts)));
    }

    #[test]
    fn udp_length_does_not_match_frame() {
        let frame = FrameBuilder::example().udp_length(80).build();
        assert_eq!(decode(&frame), Err(DecodeError::BadUDPHeader));
    }

    #[test]
    fn udp_length_below_sequence() {
        let frame = FrameBuilder::example().udp_length(11).build();
        assert_eq!(decode(&frame), Err(DecodeError::BadUDPHeader));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let mut frame = EXAMPLE_FRAME.to_vec();
        frame.push(0);
        assert_eq!(decode(&frame), Err(DecodeError::BadUDPHeader));
    }

    #[test]
    fn error_names() {
        assert_eq!(DecodeError::TooShort.name(), "not_enough_data");
        assert_eq!(DecodeError::NotIPv4.name(), "not_ipv4");
        assert_eq!(DecodeError::NotUDP.name(), "not_udp");
        assert_eq!(DecodeError::BadIPHeader.name(), "bad_ip_header");
        assert_eq!(DecodeError::BadUDPHeader.name(), "bad_udp_header");
        assert_eq!(DecodeError::BadIPHeader.to_string(), "bad IP header");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn short_input_is_always_too_short(data in prop::collection::vec(any::<u8>(), 0..MIN_FRAME_LEN)) {
                prop_assert_eq!(decode(&data), Err(DecodeError::TooShort));
            }

            #[test]
            fn decode_is_deterministic(data in prop::collection::vec(any::<u8>(), 0..200)) {
                prop_assert_eq!(decode(&data), decode(&data));
            }

            #[test]
            fn non_ipv4_ether_type_is_rejected(
                ether_type in any::<u16>().prop_filter("not IPv4", |t| *t != ETHER_TYPE_IPV4),
                tail in prop::collection::vec(any::<u8>(), 0..64)
            ) {
                let mut frame = FrameBuilder::example().ether_type(ether_type).build();
                frame.extend_from_slice(&tail);
                prop_assert_eq!(decode(&frame), Err(DecodeError::NotIPv4));
            }

            #[test]
            fn sequence_and_timestamp_survive(
                sequence in any::<u32>(),
                seconds in any::<u32>(),
                nanos in 0u32..1_000_000_000
            ) {
                let ts = Timestamp::from_parts(seconds, nanos);
                let frame = FrameBuilder::example().sequence(sequence).timestamp(ts).build();
                prop_assert_eq!(decode(&frame), Ok(FrameProperties::new(sequence, ts)));
            }
        }
    }
}
