//! Analysis configuration
//!
//! Every field has a default, so an empty document (or no file at all) gives
//! the standard feed setup. Unknown keys are rejected to catch typos.
//!
//! ```rust
//! use feedarb::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::from_yaml_str("channel_b_tag: \"16310\"").unwrap();
//! assert_eq!(config.channel_a_tag, "14310");
//! assert_eq!(config.channel_b_tag, "16310");
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::types::Channel;
use crate::{ArbError, Result};

/// Settings for locating and assigning the two capture files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Channel number found in channel A capture file names
    pub channel_a_tag: String,
    /// Channel number found in channel B capture file names
    pub channel_b_tag: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { channel_a_tag: "14310".to_string(), channel_b_tag: "15310".to_string() }
    }
}

impl AnalysisConfig {
    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(yaml)
            .map_err(|e| ArbError::config("YAML configuration", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| ArbError::file_error(path.to_path_buf(), e))?;
        let config = Self::from_yaml_str(&yaml)?;
        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Tag expected in file names of `channel`.
    pub fn tag(&self, channel: Channel) -> &str {
        match channel {
            Channel::A => &self.channel_a_tag,
            Channel::B => &self.channel_b_tag,
        }
    }

    fn validate(&self) -> Result<()> {
        for channel in Channel::ALL {
            let tag = self.tag(channel);
            if tag.is_empty() || !tag.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ArbError::config(
                    "YAML configuration",
                    format!("channel {} tag must be a non-empty number, got {:?}", channel, tag),
                ));
            }
        }
        if self.channel_a_tag == self.channel_b_tag {
            return Err(ArbError::config(
                "YAML configuration",
                format!("both channels use tag {}", self.channel_a_tag),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::scratch_dir;
    use anyhow::Result;

    #[test]
    fn defaults_match_feed_channels() {
        let config = AnalysisConfig::default();
        assert_eq!(config.tag(Channel::A), "14310");
        assert_eq!(config.tag(Channel::B), "15310");
    }

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(AnalysisConfig::from_yaml_str("").unwrap(), AnalysisConfig::default());
        assert_eq!(AnalysisConfig::from_yaml_str("  \n").unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn both_tags_override() {
        let config =
            AnalysisConfig::from_yaml_str("channel_a_tag: \"100\"\nchannel_b_tag: \"200\"\n").unwrap();
        assert_eq!(config.tag(Channel::A), "100");
        assert_eq!(config.tag(Channel::B), "200");
    }

    #[test]
    fn rejects_bad_documents() {
        for yaml in [
            "channel_c_tag: \"1\"",
            "channel_a_tag: [1, 2]",
            "channel_a_tag: \"abc\"",
            "channel_b_tag: \"14310\"",
            "channel_a_tag: \"\"",
        ] {
            let error = AnalysisConfig::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(error, ArbError::Config { .. }), "{yaml}: {error:?}");
            assert_eq!(error.exit_code(), 2);
        }
    }

    #[test]
    fn load_from_file() -> Result<()> {
        let dir = scratch_dir("config-load")?;
        let path = dir.join("feedarb.yaml");
        std::fs::write(&path, "channel_a_tag: \"2\"\n")?;

        let config = AnalysisConfig::load(&path)?;
        assert_eq!(config.channel_a_tag, "2");
        assert_eq!(config.channel_b_tag, "15310");

        std::fs::remove_dir_all(dir)?;
        Ok(())
    }

    #[test]
    fn missing_file_is_a_file_error() {
        let error = AnalysisConfig::load("/no/such/feedarb.yaml").unwrap_err();
        assert!(matches!(error, ArbError::File { .. }));
    }
}
