use crate::core::constants::ConversionConstants;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub constants: ConversionConstants,
    #[serde(default = "default_source_currency")]
    pub source_currency: String,
    #[serde(default = "default_target_currency")]
    pub target_currency: String,
}

fn default_source_currency() -> String {
    "IQD".to_string()
}

fn default_target_currency() -> String {
    "USD".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            constants: ConversionConstants::default(),
            source_currency: default_source_currency(),
            target_currency: default_target_currency(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults when
    /// no config file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "priceconv", "priceconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .constants
            .validate()
            .with_context(|| format!("Invalid constants in: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
constants:
  rate: 380
  card_divisor: 140.5
  market_rate: "1420.25"
source_currency: "SYP"
target_currency: "EUR"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.constants.rate, dec!(380));
        assert_eq!(config.constants.card_divisor, dec!(140.5));
        assert_eq!(config.constants.market_rate, dec!(1420.25));
        assert_eq!(config.source_currency, "SYP");
        assert_eq!(config.target_currency, "EUR");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml_str = r#"
constants:
  rate: 400
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.constants.rate, dec!(400));
        assert_eq!(config.constants.card_divisor, dec!(135));
        assert_eq!(config.constants.market_rate, dec!(1410));
        assert_eq!(config.source_currency, "IQD");
        assert_eq!(config.target_currency, "USD");

        let empty: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(empty, AppConfig::default());
    }

    #[test]
    fn test_load_from_path_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.yaml");
        let err = AppConfig::load_from_path(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));

        let broken = dir.path().join("broken.yaml");
        fs::write(&broken, "constants: [1, 2").unwrap();
        let err = AppConfig::load_from_path(&broken).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_from_path_rejects_negative_constants() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("negative.yaml");
        fs::write(&path, "constants:\n  rate: -372\n  card_divisor: -135\n").unwrap();

        let err = AppConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid constants"));
        assert!(format!("{err:#}").contains("must not be negative"));
    }
}
