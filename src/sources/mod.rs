//! Frame source implementations
//!
//! - [`CaptureSource`] reads a pcap capture file
//! - [`MemorySource`] replays frames held in memory

pub mod capture;
pub mod memory;

pub use capture::CaptureSource;
pub use memory::MemorySource;
