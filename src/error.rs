//! Error types for feed analysis.
//!
//! Only the setup stages can fail: locating the capture files, deciding which
//! one is channel A, opening them, and loading configuration. Once both
//! frame sources are open the arbitration itself never fails; per-frame
//! problems are reported as diagnostics instead (see [`crate::arbiter`]).
//!
//! ## Exit Codes
//!
//! Each error maps to the process exit code used by the `feedarb` binary:
//!
//! ```rust
//! use feedarb::ArbError;
//!
//! let error = ArbError::channel_assignment("both filenames are identical");
//! assert_eq!(error.exit_code(), 15);
//! assert_eq!(error.to_string(), "both filenames are identical");
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::Channel;

/// Result type alias for feed analysis operations.
pub type Result<T, E = ArbError> = std::result::Result<T, E>;

/// Main error type for feed analysis setup.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ArbError {
    #[error("{reason}")]
    Arguments { reason: String },

    #[error("{reason}")]
    Discovery { path: PathBuf, reason: String },

    #[error("{reason}")]
    ChannelAssignment { reason: String },

    #[error("failed to open file {channel}: {}", .path.display())]
    CaptureOpen {
        channel: Channel,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file {channel}, error: {source}")]
    CaptureFormat {
        channel: Channel,
        path: PathBuf,
        #[source]
        source: pcap_file::PcapError,
    },

    #[error("file error: {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error in {context}: {details}")]
    Config { context: String, details: String },
}

impl ArbError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ArbError::Arguments { .. } => 13,
            ArbError::Discovery { .. } => 14,
            ArbError::ChannelAssignment { .. } => 15,
            ArbError::CaptureOpen { .. } | ArbError::CaptureFormat { .. } => 16,
            ArbError::File { .. } | ArbError::Config { .. } => 2,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ArbError::Arguments { .. } => {
                vec!["Pass exactly one directory argument", "Run with --help for usage"]
            }
            ArbError::Discovery { .. } => vec![
                "Check the directory exists and is readable",
                "Keep exactly two capture files in the directory",
                "Remove stray subdirectories from the input directory",
            ],
            ArbError::ChannelAssignment { .. } => vec![
                "Name capture files as <prefix>_<channel>-<index>.pcap",
                "Check the channel tags in the configuration",
            ],
            ArbError::CaptureOpen { .. } => {
                vec!["Check file permissions", "Check the file was not removed during the run"]
            }
            ArbError::CaptureFormat { .. } => vec![
                "Verify the file is a classic pcap capture (not pcapng)",
                "Check the capture was not truncated",
            ],
            ArbError::File { .. } => vec!["Check file exists and is readable"],
            ArbError::Config { .. } => {
                vec!["Check the configuration file is valid YAML", "Check field names and types"]
            }
        }
    }

    /// Helper constructor for argument errors.
    pub fn arguments(reason: impl Into<String>) -> Self {
        ArbError::Arguments { reason: reason.into() }
    }

    /// Helper constructor for input discovery errors.
    pub fn discovery(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ArbError::Discovery { path: path.into(), reason: reason.into() }
    }

    /// Helper constructor for channel assignment errors.
    pub fn channel_assignment(reason: impl Into<String>) -> Self {
        ArbError::ChannelAssignment { reason: reason.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        ArbError::File { path, source }
    }

    /// Helper constructor for configuration errors.
    pub fn config(context: impl Into<String>, details: impl Into<String>) -> Self {
        ArbError::Config { context: context.into(), details: details.into() }
    }
}
