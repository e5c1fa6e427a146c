use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

use super::widget::Theme;

fn default_timeout_secs() -> u64 {
    10
}

fn default_from() -> String {
    "USD".to_string()
}

fn default_to() -> String {
    "INR".to_string()
}

fn default_amount() -> String {
    "1".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencyApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CurrencyApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CurrencyApiConfig {
    fn default() -> Self {
        CurrencyApiConfig {
            base_url: "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies"
                .to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FlagsConfig {
    pub base_url: String,
}

impl Default for FlagsConfig {
    fn default() -> Self {
        FlagsConfig {
            base_url: "https://flagsapi.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub currency_api: CurrencyApiConfig,
    #[serde(default)]
    pub flags: FlagsConfig,
}

/// Initial state of the converter widget.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WidgetConfig {
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(default = "default_to")]
    pub to: String,
    #[serde(default = "default_amount")]
    pub amount: String,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            from: default_from(),
            to: default_to(),
            amount: default_amount(),
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "curconv")
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
providers:
  currency_api:
    base_url: "http://example.com/currencies"
    timeout_secs: 3
  flags:
    base_url: "http://example.com/flags"
widget:
  from: "EUR"
  to: "GBP"
  amount: "250"
  theme: dark
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.currency_api.base_url,
            "http://example.com/currencies"
        );
        assert_eq!(config.providers.currency_api.timeout(), Duration::from_secs(3));
        assert_eq!(config.providers.flags.base_url, "http://example.com/flags");
        assert_eq!(config.widget.from, "EUR");
        assert_eq!(config.widget.to, "GBP");
        assert_eq!(config.widget.amount, "250");
        assert_eq!(config.widget.theme, Theme::Dark);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let yaml_str = r#"
providers:
  currency_api:
    base_url: "http://localhost:8080"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.currency_api.base_url, "http://localhost:8080");
        assert_eq!(config.providers.currency_api.timeout_secs, 10);
        assert_eq!(config.providers.flags.base_url, "https://flagsapi.com");
        assert_eq!(config.widget.from, "USD");
        assert_eq!(config.widget.to, "INR");
        assert_eq!(config.widget.amount, "1");
        assert_eq!(config.widget.theme, Theme::Light);

        let empty: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert!(empty.providers.currency_api.base_url.contains("@fawazahmed0/currency-api"));
    }

    #[test]
    fn test_default_config_path_is_named_after_app() {
        let path = AppConfig::default_config_path().expect("Failed to resolve config path");
        assert!(path.ends_with("config.yaml"));
        assert!(
            path.components()
                .any(|c| c.as_os_str().to_string_lossy().contains("curconv"))
        );
        assert!(!path.to_string_lossy().contains("codito"));
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("missing.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
