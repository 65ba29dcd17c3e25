//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Environment variables
//! - Command-line arguments

use crate::error::{Error, Result};
use crate::logging::LoggingConfig;
use presenter_core::PresenterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name written by `config init`
pub const PROJECT_CONFIG_FILE: &str = "presenter.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Presenter settings (getter pattern)
    pub presenter: PresenterConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators for collections
    pub progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

/// Serialization format of a document, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    /// Detect the format of `path`; JSON when the extension is unknown
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("toml") => FileFormat::Toml,
            _ => FileFormat::Json,
        }
    }

    /// Parse `content` in this format
    pub fn parse<T: serde::de::DeserializeOwned>(self, content: &str) -> Result<T> {
        Ok(match self {
            FileFormat::Json => serde_json::from_str(content)?,
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Toml => toml::from_str(content)?,
        })
    }

    /// Serialize `value` in this format
    pub fn render<T: Serialize>(self, value: &T) -> Result<String> {
        Ok(match self {
            FileFormat::Json => serde_json::to_string_pretty(value)?,
            FileFormat::Yaml => serde_yaml::to_string(value)?,
            FileFormat::Toml => toml::to_string_pretty(value)?,
        })
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = FileFormat::from_path(path).parse(&content)?;

        // Surface a bad getter pattern at load time
        config.presenter.getter_pattern()?;

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(PROJECT_CONFIG_FILE),
            PathBuf::from(".presenter.toml"),
            PathBuf::from(".presenter.yaml"),
            PathBuf::from(".presenter.json"),
        ];

        if let Some(user_path) = Self::user_config_path() {
            paths.push(user_path);
        }

        paths
    }

    /// Location of the per-user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("presenter").join("config.toml"))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = FileFormat::from_path(path).render(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Builder for creating configurations programmatically
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new config builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the getter pattern
    pub fn getter_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.presenter.getter_pattern = Some(pattern.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_path(Path::new("a.yaml")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("a.YML")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("a.toml")), FileFormat::Toml);
        assert_eq!(FileFormat::from_path(Path::new("a.json")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("model")), FileFormat::Json);
    }

    #[test]
    fn test_load_toml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presenter.toml");
        std::fs::write(
            &path,
            r#"
[presenter]
getter_pattern = ':(\w*?):'

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.presenter.getter_pattern.as_deref(), Some(r":(\w*?):"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_load_yaml_and_json_config() {
        let dir = TempDir::new().unwrap();

        let yaml = dir.path().join(".presenter.yaml");
        std::fs::write(&yaml, "presenter:\n  getter_pattern: '%(\\w+)%'\n").unwrap();
        let config = Config::from_file(&yaml).unwrap();
        assert_eq!(config.presenter.getter_pattern.as_deref(), Some(r"%(\w+)%"));

        let json = dir.path().join(".presenter.json");
        std::fs::write(&json, r#"{"output": {"color": false}}"#).unwrap();
        let config = Config::from_file(&json).unwrap();
        assert!(!config.output.color);
        assert!(config.output.progress);
    }

    #[test]
    fn test_invalid_pattern_is_rejected_at_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presenter.toml");
        std::fs::write(&path, "[presenter]\ngetter_pattern = '[unclosed'\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Core(_)));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = Config::from_file(Path::new("/nonexistent/presenter.toml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut config = ConfigBuilder::new().getter_pattern(r":(\w*?):").build();
        config.logging.apply_verbosity(1);

        for name in ["saved.toml", "saved.yaml", "saved.json"] {
            let path = dir.path().join("nested").join(name);
            config.save(&path).unwrap();
            assert_eq!(Config::from_file(&path).unwrap(), config);
        }
    }
}
