use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// One asset as declared in the config file: its current value and the
/// target share of the portfolio in percent (the same scale the interactive
/// prompts use).
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssetConfig {
    pub name: String,
    pub value: f64,
    pub target: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub assets: Vec<AssetConfig>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "€".to_string()
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Loads the config at the default location, or `None` when no file has
    /// been set up there yet.
    pub fn load_if_present() -> Result<Option<Self>> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Ok(Some(Self::load_from_path(&config_path)?))
        } else {
            debug!("No config file at {}", config_path.display());
            Ok(None)
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "aporta")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
assets:
  - name: "MSCI World"
    value: 9000.0
    target: 60
  - name: "Emerging Markets"
    value: 2500.0
    target: 30
  - name: "Bitcoin"
    value: 500.0
    target: 10
currency: "€"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.assets.len(), 3);
        assert_eq!(config.assets[0].name, "MSCI World");
        assert_eq!(config.assets[0].value, 9000.0);
        assert_eq!(config.assets[0].target, 60.0);
        assert_eq!(config.assets[2].name, "Bitcoin");
        assert_eq!(config.currency, "€");
    }

    #[test]
    fn test_currency_defaults_to_euro() {
        let yaml_str = r#"
assets:
  - name: "World ETF"
    value: 100.0
    target: 100
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.currency, "€");
    }

    #[test]
    fn test_load_from_path_round_trip() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "assets:\n  - name: \"A\"\n    value: 1.0\n    target: 100\n",
        )?;

        let config = AppConfig::load_from_path(&path)?;
        assert_eq!(config.assets.len(), 1);
        assert_eq!(config.assets[0].name, "A");
        Ok(())
    }

    #[test]
    fn test_missing_file_fails_with_path_in_context() {
        let err = AppConfig::load_from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
