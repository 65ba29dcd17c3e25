//! Shared utilities for command handlers

use crate::config::FileFormat;
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load a JSON, YAML or TOML document as a JSON value
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let format = FileFormat::from_path(path);

    format
        .parse::<Value>(&content)
        .map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: format_name(format).to_string(),
            message: e.to_string(),
        })
}

fn format_name(format: FileFormat) -> &'static str {
    match format {
        FileFormat::Json => "JSON",
        FileFormat::Yaml => "YAML",
        FileFormat::Toml => "TOML",
    }
}
