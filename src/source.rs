//! Frame source trait for per-channel capture streams

/// Pull interface over one channel's captured frames
///
/// Sources abstract over where frames come from (capture files, memory)
/// and are pulled one frame at a time by the arbitration engine.
///
/// Returns:
/// - `Some(bytes)` - Raw bytes of the next captured frame
/// - `None` - Stream exhausted
///
/// The returned slice borrows the source and is therefore only usable until
/// the next pull. Once a source returns `None` it must keep returning `None`.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<&[u8]>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn next_frame(&mut self) -> Option<&[u8]> {
        (**self).next_frame()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Option<&[u8]> {
        (**self).next_frame()
    }
}
