/// Engine configuration file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Settings read from a RON file. Every field is optional; anything left
/// out falls back to the builder's defaults.
///
/// ```ron
/// (
///     lexicon_dir: Some("data/lexicon"),
///     phrases: Some("data/phrases.ron"),
///     seed: Some(42),
///     max_attempts: None,
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub lexicon_dir: Option<String>,
    pub phrases: Option<String>,
    pub seed: Option<u64>,
    pub max_attempts: Option<u64>,
}

impl EngineConfig {
    pub fn load_from_ron(path: &Path) -> Result<EngineConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<EngineConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}
