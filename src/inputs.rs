//! Input discovery and channel assignment
//!
//! A capture directory holds exactly two files, one per channel. The channel
//! is encoded in the file name as the digit group between the last `_` and
//! the following `-`, e.g. `feed_14310-0.pcap`.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::types::{Channel, ChannelPair};
use crate::{ArbError, Result};

const CHANNEL_PATTERN: &str = r"^.*_([0-9]+)-[0-9]+.pcap$";

/// List the two capture files in `dir`, in sorted order.
pub fn find_inputs<P: AsRef<Path>>(dir: P) -> Result<[PathBuf; 2]> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(ArbError::discovery(dir, format!("path {} does not exist", dir.display())));
    }
    if !dir.is_dir() {
        return Err(ArbError::discovery(dir, format!("path {} is not a directory", dir.display())));
    }

    let unreadable = |e: std::io::Error| {
        ArbError::discovery(dir, format!("cannot read directory {}: {}", dir.display(), e))
    };

    let mut entries = Vec::with_capacity(2);
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        if entries.len() == 2 {
            return Err(ArbError::discovery(
                dir,
                format!("too many files in directory: {}", dir.display()),
            ));
        }
        entries.push(entry.map_err(unreadable)?.path());
    }

    let [first, second]: [PathBuf; 2] = entries.try_into().map_err(|_| {
        ArbError::discovery(dir, format!("too few files in directory: {}", dir.display()))
    })?;

    if !first.is_file() || !second.is_file() {
        return Err(ArbError::discovery(
            dir,
            format!("an input is not a regular file: {}, {}", first.display(), second.display()),
        ));
    }

    let mut inputs = [first, second];
    inputs.sort();
    debug!("Found inputs in {}: {:?}", dir.display(), inputs);
    Ok(inputs)
}

/// Assign two capture files to channels by the tag in their names.
///
/// Either order is accepted, but the two files must carry different tags.
///
/// ```rust
/// use feedarb::config::AnalysisConfig;
/// use feedarb::inputs::sort_channels;
///
/// let files = ["feed_15310-0.pcap".into(), "feed_14310-0.pcap".into()];
/// let channels = sort_channels(&files, &AnalysisConfig::default()).unwrap();
/// assert_eq!(channels.a.to_str(), Some("feed_14310-0.pcap"));
/// ```
pub fn sort_channels(files: &[PathBuf; 2], config: &AnalysisConfig) -> Result<ChannelPair<PathBuf>> {
    let [first, second] = files;
    if first.as_os_str().is_empty() {
        return Err(ArbError::channel_assignment("first filename is empty"));
    }
    if second.as_os_str().is_empty() {
        return Err(ArbError::channel_assignment("second filename is empty"));
    }
    if first == second {
        return Err(ArbError::channel_assignment("both filenames are identical"));
    }

    let pattern = Regex::new(CHANNEL_PATTERN)
        .map_err(|e| ArbError::config("Channel file name pattern", e.to_string()))?;
    let channel_of = |path: &Path| -> Option<Channel> {
        let name = path.to_string_lossy();
        let captures = pattern.captures(&name)?;
        let tag = captures.get(1)?.as_str();
        Channel::ALL.into_iter().find(|&channel| config.tag(channel) == tag)
    };

    let first_channel = channel_of(first).ok_or_else(|| {
        ArbError::channel_assignment(format!("unexpected channel of first file: {}", first.display()))
    })?;
    if channel_of(second) != Some(first_channel.other()) {
        return Err(ArbError::channel_assignment(format!(
            "unexpected channel of second file: {}",
            second.display()
        )));
    }

    let channels = match first_channel {
        Channel::A => ChannelPair::new(first.clone(), second.clone()),
        Channel::B => ChannelPair::new(second.clone(), first.clone()),
    };
    info!("Channel A: {}, channel B: {}", channels.a.display(), channels.b.display());
    Ok(channels)
}
