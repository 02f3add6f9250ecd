//! Tool configuration (`.onramp.config.json`).
//!
//! Optional; pins content override paths and a default output format. CLI
//! flags always win over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Main tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Override path for the tagged reference guide markdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<PathBuf>,

    /// Override path for the checklist JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checklist: Option<PathBuf>,

    /// Default output format ("markdown" or "json")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
