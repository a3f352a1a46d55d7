use crate::dictionary::Dictionary;
use crate::packet::Packet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Codec policy
///
/// Every field has a default, so an empty JSON object is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Largest packet `encode` will produce (default: 4096, RFC 2865 Section 3)
    #[serde(default = "default_max_packet_size")]
    pub max_packet_size: usize,

    /// Reject packets whose header Length is below 20 or beyond the received
    /// bytes (default: true). When disabled, every byte after the header is
    /// treated as attribute data.
    #[serde(default = "default_enforce_header_length")]
    pub enforce_header_length: bool,

    /// Reject attributes of type 0 instead of logging and keeping them
    /// (default: false)
    #[serde(default)]
    pub reject_zero_attribute_type: bool,

    /// Optional JSON attribute dictionary; the standard dictionary is used
    /// when unset
    #[serde(default)]
    pub dictionary_path: Option<String>,
}

fn default_max_packet_size() -> usize {
    Packet::MAX_PACKET_SIZE
}

fn default_enforce_header_length() -> bool {
    true
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            max_packet_size: default_max_packet_size(),
            enforce_header_length: default_enforce_header_length(),
            reject_zero_attribute_type: false,
            dictionary_path: None,
        }
    }
}

impl CodecConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: CodecConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // The header Length field is a u16 and must cover the header itself
        if self.max_packet_size < Packet::MIN_PACKET_SIZE
            || self.max_packet_size > usize::from(u16::MAX)
        {
            return Err(ConfigError::Invalid(format!(
                "max_packet_size must be between {} and {}, got {}",
                Packet::MIN_PACKET_SIZE,
                u16::MAX,
                self.max_packet_size
            )));
        }

        if let Some(path) = &self.dictionary_path {
            if path.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "dictionary_path cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Load the configured dictionary, or the standard one
    pub fn load_dictionary(&self) -> Result<Dictionary, ConfigError> {
        match &self.dictionary_path {
            Some(path) => Dictionary::from_file(path),
            None => Ok(Dictionary::standard()),
        }
    }
}
