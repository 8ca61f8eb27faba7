//! In-memory frame source

use std::collections::VecDeque;

use crate::source::FrameSource;

/// Frame source over a fixed list of frames held in memory.
///
/// Useful for tests and for replaying frames obtained elsewhere.
/// Empty frames are delivered as zero-length slices.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pending: VecDeque<Vec<u8>>,
    current: Option<Vec<u8>>,
}

impl MemorySource {
    pub fn new<I, F>(frames: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Vec<u8>>,
    {
        Self { pending: frames.into_iter().map(Into::into).collect(), current: None }
    }

    /// Frames not yet pulled.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Option<&[u8]> {
        self.current = self.pending.pop_front();
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_in_order_then_stays_exhausted() {
        let mut source = MemorySource::new([vec![1u8, 2], vec![], vec![3]]);
        assert_eq!(source.remaining(), 3);
        assert_eq!(source.next_frame(), Some(&[1u8, 2][..]));
        assert_eq!(source.next_frame(), Some(&[][..]));
        assert_eq!(source.next_frame(), Some(&[3u8][..]));
        assert_eq!(source.next_frame(), None);
        assert_eq!(source.next_frame(), None);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn empty_source_is_exhausted() {
        let mut source = MemorySource::default();
        assert!(source.next_frame().is_none());
    }
}
