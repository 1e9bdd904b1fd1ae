//! Configuration module

use crate::error::CliError;
use anyhow::Result;
use dots_core::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "dots.toml";

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CliConfig {
    /// Resolution settings (top-level keys and the `[build]` table)
    #[serde(flatten)]
    pub resolver: ResolverConfig,

    /// Output configuration
    pub output: OutputConfig,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load the configuration file at `path`
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `explicit` if given, else `dots.toml` in the working directory, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    log::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };
        log::info!("Loading configuration from {}", path.display());
        Self::from_file(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.resolver.source_suffix, ".go");
        assert_eq!(config.output.default_format, "text");
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_full_config() {
        let config = CliConfig::from_toml_str(
            r#"
source_suffix = ".rs"

[build]
goos = "darwin"
cgo_enabled = false

[output]
default_format = "json"
pretty_json = false
"#,
        )
        .unwrap();

        assert_eq!(config.resolver.source_suffix, ".rs");
        assert_eq!(config.resolver.build.goos, "darwin");
        assert!(!config.resolver.build.cgo_enabled);
        assert_eq!(config.output.default_format, "json");
        assert!(!config.output.pretty_json);
    }

    #[test]
    fn test_invalid_config() {
        let err = CliConfig::from_toml_str("source_suffix = 42").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[output]\ndefault_format = \"json\"").unwrap();

        let config = CliConfig::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.output.default_format, "json");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/dots.toml"))).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
