//! Captured frame decoding (cross-platform)
//!
//! This module validates a single captured Ethernet/IPv4/UDP frame carrying
//! a capture-hardware trailer, and extracts the feed sequence number and
//! the hardware timestamp from it.

pub mod decoder;
pub mod layout;

pub use decoder::{DecodeError, decode};
