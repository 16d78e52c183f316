//! # Configuration
//!
//! Stored as `config.json` in the data directory. Missing files and missing
//! keys fall back to defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `match-titles` | `true` | Match id-less drafts to records by trimmed title |
//!
//! Whether a sync deletes is never configured here: every call chooses it.

use crate::error::{CopyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CopydeckConfig {
    #[serde(default = "default_match_titles")]
    pub match_titles: bool,
}

fn default_match_titles() -> bool {
    true
}

impl Default for CopydeckConfig {
    fn default() -> Self {
        Self {
            match_titles: default_match_titles(),
        }
    }
}

impl CopydeckConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CopyError::Io)?;
        let config: CopydeckConfig =
            serde_json::from_str(&content).map_err(CopyError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CopyError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CopyError::Serialization)?;
        fs::write(config_path, content).map_err(CopyError::Io)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["match-titles"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "match-titles" => Some(self.match_titles.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let flag = parse_bool(value)
            .ok_or_else(|| format!("Invalid value for {}: {} (expected true/false)", key, value))?;
        match key {
            "match-titles" => self.match_titles = flag,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
