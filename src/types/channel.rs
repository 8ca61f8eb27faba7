//! Channel identity and A/B pairs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two redundant copies of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    A,
    B,
}

impl Channel {
    /// Both channels, in pull order.
    pub const ALL: [Channel; 2] = [Channel::A, Channel::B];

    /// Numeric index used in diagnostic lines (`0` for A, `1` for B).
    pub fn index(self) -> usize {
        match self {
            Channel::A => 0,
            Channel::B => 1,
        }
    }

    /// The opposite channel.
    pub fn other(self) -> Self {
        match self {
            Channel::A => Channel::B,
            Channel::B => Channel::A,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::A => f.write_str("A"),
            Channel::B => f.write_str("B"),
        }
    }
}

/// A value held once per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelPair<T> {
    pub a: T,
    pub b: T,
}

impl<T> ChannelPair<T> {
    pub const fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    /// Apply `f` to both sides.
    pub fn map<U>(self, mut f: impl FnMut(Channel, T) -> U) -> ChannelPair<U> {
        ChannelPair { a: f(Channel::A, self.a), b: f(Channel::B, self.b) }
    }

    pub fn as_ref(&self) -> ChannelPair<&T> {
        ChannelPair { a: &self.a, b: &self.b }
    }
}

impl<T> Index<Channel> for ChannelPair<T> {
    type Output = T;

    fn index(&self, channel: Channel) -> &T {
        match channel {
            Channel::A => &self.a,
            Channel::B => &self.b,
        }
    }
}

impl<T> IndexMut<Channel> for ChannelPair<T> {
    fn index_mut(&mut self, channel: Channel) -> &mut T {
        match channel {
            Channel::A => &mut self.a,
            Channel::B => &mut self.b,
        }
    }
}

impl<T: fmt::Display> fmt::Display for ChannelPair<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(A={}, B={})", self.a, self.b)
    }
}
