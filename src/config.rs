//! Configuration for the metadata tools
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (metadata.toml)
//! - Environment variables (LIBRA_METADATA__*)
//!
//! ## Example config file (metadata.toml):
//! ```toml
//! [dump]
//! format = "text"
//! kind = "oa"
//! pretty = true
//!
//! [schema]
//! upgrade = false
//! ```

use std::fmt;
use std::str::FromStr;

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::document::WorkKind;
use crate::error::MetadataError;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Dump tool settings
    #[serde(default)]
    pub dump: DumpConfig,

    /// Schema handling settings
    #[serde(default)]
    pub schema: SchemaSettings,
}

/// Dump tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Output format when none is given on the command line
    #[serde(default)]
    pub format: OutputFormat,

    /// Document kind when none is given on the command line
    #[serde(default)]
    pub kind: WorkKind,

    /// Indent JSON output
    #[serde(default)]
    pub pretty: bool,
}

/// Output format of the dump tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Text => f.write_str("text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(MetadataError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Schema handling configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaSettings {
    /// Upgrade documents from earlier generations instead of rejecting them
    #[serde(default)]
    pub upgrade: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            kind: WorkKind::Etd,
            pretty: false,
        }
    }
}

impl MetadataConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file that must exist
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "metadata.toml",
            ".metadata.toml",
            "config/metadata.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("org", "libra", "libra-metadata") {
            let xdg_config = config_dir.config_dir().join("metadata.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // LIBRA_METADATA__DUMP__FORMAT=text
        builder = builder.add_source(
            Environment::with_prefix("LIBRA_METADATA")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
