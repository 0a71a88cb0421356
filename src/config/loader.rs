//! Load a configuration from JSON

use std::fs;
use std::path::Path;

use super::ModelConfig;
use crate::error::{ModelGenError, Result};

/// Read and parse a JSON configuration file
pub fn load_config(path: &Path) -> Result<ModelConfig> {
    let content = fs::read_to_string(path).map_err(|e| ModelGenError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content).map_err(|e| ModelGenError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse a JSON configuration from text
pub fn parse_config(json: &str) -> std::result::Result<ModelConfig, serde_json::Error> {
    // Strip a UTF-8 BOM; editors on Windows like to add one
    let json = json.strip_prefix('\u{feff}').unwrap_or(json);
    serde_json::from_str(json)
}
