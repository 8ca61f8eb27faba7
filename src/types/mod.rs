//! Core value types shared by the decoder and the arbitration engine.
//!
//! - [`Channel`] names one of the two redundant feed copies
//! - [`ChannelPair`] holds one value per channel and is indexable by [`Channel`]
//! - [`Timestamp`] is a nanosecond point in time taken from a capture trailer
//! - [`FrameProperties`] is what the decoder extracts from a single frame
//!
//! ## Usage Example
//!
//! ```rust
//! use feedarb::types::{Channel, ChannelPair, FrameProperties, Timestamp};
//!
//! let mut counts = ChannelPair::<u64>::default();
//! counts[Channel::B] += 1;
//! assert_eq!(counts.to_string(), "(A=0, B=1)");
//!
//! let props = FrameProperties::new(7, Timestamp::from_parts(1, 40));
//! assert_eq!(props.timestamp.as_nanos(), 1_000_000_040);
//! ```

mod channel;
mod frame;
mod timestamp;

pub use channel::{Channel, ChannelPair};
pub use frame::FrameProperties;
pub use timestamp::Timestamp;
