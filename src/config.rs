//! Explorer configuration file support
//!
//! Handles parsing of `.odata-explorer.toml` configuration files and
//! environment variable overrides.

use crate::import::NormalizeOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".odata-explorer.toml";

/// Default base name for exported graphs
pub const DEFAULT_GRAPH_NAME: &str = "OData-Model";

/// Environment variable for normalizing every schema entry
pub const ENV_ALL_SCHEMAS: &str = "ODATA_EXPLORER_ALL_SCHEMAS";

/// Environment variable for the Markdown extensions column
pub const ENV_SHOW_EXTENSIONS: &str = "ODATA_EXPLORER_SHOW_EXTENSIONS";

/// Environment variable for the exported graph name
pub const ENV_GRAPH_NAME: &str = "ODATA_EXPLORER_GRAPH_NAME";

/// Error loading or saving configuration
#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Normalization configuration section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeSection {
    /// Normalize every schema entry instead of only the first
    #[serde(default)]
    pub all_schemas: bool,
}

/// Export configuration section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSection {
    /// Add the raw extension list to Markdown property tables
    #[serde(default)]
    pub show_extensions: bool,

    /// Base name of exported graph files
    #[serde(default = "default_graph_name")]
    pub graph_name: String,
}

fn default_graph_name() -> String {
    DEFAULT_GRAPH_NAME.to_string()
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            show_extensions: false,
            graph_name: default_graph_name(),
        }
    }
}

/// Main configuration structure
///
/// Represents the `.odata-explorer.toml` configuration file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub normalize: NormalizeSection,

    #[serde(default)]
    pub export: ExportSection,
}

impl ExplorerConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.odata-explorer.toml` in the directory.
    /// Falls back to defaults if not found.
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::read(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from an explicit file, then apply environment overrides
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::read(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn read(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::IoError(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a directory
    pub fn save(&self, dir: &Path) -> ConfigResult<()> {
        let content = self.to_toml()?;
        std::fs::write(dir.join(CONFIG_FILENAME), content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// Unparseable boolean values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_ALL_SCHEMAS)
            && let Some(flag) = parse_bool(&value)
        {
            self.normalize.all_schemas = flag;
        }

        if let Some(value) = lookup(ENV_SHOW_EXTENSIONS)
            && let Some(flag) = parse_bool(&value)
        {
            self.export.show_extensions = flag;
        }

        if let Some(name) = lookup(ENV_GRAPH_NAME)
            && !name.is_empty()
        {
            self.export.graph_name = name;
        }
    }

    /// Normalizer options derived from this configuration
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            all_schemas: self.normalize.all_schemas,
        }
    }

    /// Check if a configuration file exists in a directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILENAME).exists()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# OData Explorer configuration

[normalize]
# Normalize every schema entry of a document instead of only the first
all_schemas = false

[export]
# Add the raw extension list to Markdown property tables
show_extensions = false

# Base name of exported graph files
graph_name = "OData-Model"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ExplorerConfig::new();
        assert!(!config.normalize.all_schemas);
        assert!(!config.export.show_extensions);
        assert_eq!(config.export.graph_name, DEFAULT_GRAPH_NAME);
    }

    #[test]
    fn test_parse_partial_config() {
        let config = ExplorerConfig::parse(
            r#"
[normalize]
all_schemas = true
"#,
        )
        .unwrap();
        assert!(config.normalize.all_schemas);
        assert_eq!(config.export, ExportSection::default());
        assert!(config.normalize_options().all_schemas);
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = ExplorerConfig::parse("[normalize]\nall_schemas = \"maybe\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_sample_config_parses() {
        let config = ExplorerConfig::parse(sample_config()).unwrap();
        assert_eq!(config, ExplorerConfig::default());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut config = ExplorerConfig::new();
        config.export.show_extensions = true;
        config.export.graph_name = "Northwind".to_string();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("graph_name = \"Northwind\""));
        assert_eq!(ExplorerConfig::parse(&toml).unwrap(), config);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_ALL_SCHEMAS, "1"),
            (ENV_SHOW_EXTENSIONS, "bogus"),
            (ENV_GRAPH_NAME, "Sales"),
        ]);
        let mut config = ExplorerConfig::new();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert!(config.normalize.all_schemas);
        assert!(!config.export.show_extensions);
        assert_eq!(config.export.graph_name, "Sales");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        assert!(!ExplorerConfig::exists(dir.path()));

        let mut config = ExplorerConfig::new();
        config.export.graph_name = "Saved".to_string();
        config.save(dir.path()).unwrap();
        assert!(ExplorerConfig::exists(dir.path()));

        let loaded = ExplorerConfig::read(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(loaded.export.graph_name, "Saved");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempdir().unwrap();
        let err = ExplorerConfig::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
