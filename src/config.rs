//! Configuration for the MicroJSON tools
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (microjson.toml)
//! - Environment variables (MICROJSON__*)
//!
//! ## Example config file (microjson.toml):
//! ```toml
//! [validation]
//! dialect = "microjson"
//! strict = false
//! check_ring_closure = true
//! allow_mixed_dimensions = false
//! json_schema = true
//!
//! [output]
//! format = "pretty"
//! ```

use config_crate::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::document::Dialect;
use crate::validate::ValidationOptions;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MicroJsonConfig {
    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Dialect used when none is given on the command line
    #[serde(default)]
    pub dialect: Dialect,

    /// Report warnings as errors
    #[serde(default)]
    pub strict: bool,

    /// Require polygon rings to be closed
    #[serde(default = "default_true")]
    pub check_ring_closure: bool,

    /// Accept 2D and 3D positions in one geometry (as a warning)
    #[serde(default)]
    pub allow_mixed_dimensions: bool,

    /// Also validate against the embedded JSON Schema
    #[serde(default = "default_true")]
    pub json_schema: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    pub fn is_pretty(&self) -> bool {
        matches!(self, OutputFormat::Pretty)
    }
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            strict: false,
            check_ring_closure: true,
            allow_mixed_dimensions: false,
            json_schema: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
        }
    }
}

impl ValidationConfig {
    pub fn options(&self) -> ValidationOptions {
        ValidationOptions {
            strict: self.strict,
            check_ring_closure: self.check_ring_closure,
            allow_mixed_dimensions: self.allow_mixed_dimensions,
        }
    }
}

impl MicroJsonConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["microjson.toml", ".microjson.toml", "config/microjson.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "microjson", "microjson") {
            let xdg_config = config_dir.config_dir().join("microjson.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (MICROJSON__*)
        builder = builder.add_source(
            Environment::with_prefix("MICROJSON")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Parse a TOML document on its own, without files or environment
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = MicroJsonConfig::default();
        assert_eq!(config.validation.dialect, Dialect::MicroJson);
        assert!(config.validation.json_schema);
        assert_eq!(config.validation.options(), ValidationOptions::default());
        assert!(config.output.format.is_pretty());
    }

    #[test]
    fn test_serialize_config() {
        let config = MicroJsonConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[validation]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("dialect = \"microjson\""));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MicroJsonConfig::from_toml_str(
            r#"
            [validation]
            dialect = "geojson"
            strict = true

            [output]
            format = "compact"
            "#,
        )
        .unwrap();
        assert_eq!(config.validation.dialect, Dialect::GeoJson);
        assert!(config.validation.strict);
        assert!(config.validation.check_ring_closure);
        assert_eq!(config.output.format, OutputFormat::Compact);
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("microjson.toml");
        let path = path.to_str().unwrap();

        let mut config = MicroJsonConfig::default();
        config.validation.allow_mixed_dimensions = true;
        config.save(path).unwrap();

        let loaded = MicroJsonConfig::load_from(Some(path)).unwrap();
        assert!(loaded.validation.allow_mixed_dimensions);
    }

    #[test]
    fn test_unknown_dialect_rejected() {
        let err = MicroJsonConfig::from_toml_str("[validation]\ndialect = \"topojson\"\n");
        assert!(err.is_err());
    }
}
