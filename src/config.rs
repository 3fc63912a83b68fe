//! Workbench configuration loaded from a TOML file.
//!
//! Every section is optional; missing keys fall back to the values the
//! storefront ships with.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Failure to read or validate a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {message}")]
    Read { path: String, message: String },
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AtelierConfig {
    pub storage: StorageConfig,
    pub pricing: PricingConfig,
    pub ui: UiConfig,
    pub relay: RelayConfig,
}

/// `[storage]` — where the in-progress customization is kept.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StorageConfig {
    /// Directory for the file-backed store. `None` uses the OS data dir.
    pub dir: Option<PathBuf>,
    /// Fixed key of the current in-progress customization.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: "personalization-1".to_string(),
        }
    }
}

/// `[pricing]` — amounts in dirhams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PricingConfig {
    pub base_price: u32,
    pub slogan_surcharge: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_price: 249,
            slogan_surcharge: 50,
        }
    }
}

/// `[ui]` — timing of post-submission feedback.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct UiConfig {
    /// Delay between the success notice and the redirect to the landing page.
    pub redirect_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: 1500,
        }
    }
}

impl UiConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// `[relay]` — spreadsheet side channel.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RelayConfig {
    pub retries: u32,
    pub retry_delay_ms: u64,
    /// Shared secret sent with every payload.
    pub secret: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            retries: 2,
            retry_delay_ms: 1500,
            secret: String::new(),
        }
    }
}

impl RelayConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Parse and validate a TOML configuration string.
pub fn parse(toml_str: &str) -> Result<AtelierConfig, ConfigError> {
    let cfg: AtelierConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Load the configuration at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<AtelierConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AtelierConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse(&text)
}

/// `<config dir>/jerseylab/config.toml`
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_default()
        .join("jerseylab")
        .join("config.toml")
}

fn validate(cfg: &AtelierConfig) -> Result<(), ConfigError> {
    if cfg.pricing.base_price == 0 {
        return Err(ConfigError::Invalid(
            "pricing.base_price must be greater than zero".to_string(),
        ));
    }
    if cfg.storage.key.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "storage.key must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_storefront_defaults() {
        let cfg = parse("").expect("empty config parses");
        assert_eq!(cfg.pricing.base_price, 249);
        assert_eq!(cfg.pricing.slogan_surcharge, 50);
        assert_eq!(cfg.storage.key, "personalization-1");
        assert_eq!(cfg.ui.redirect_delay(), Duration::from_millis(1500));
        assert_eq!(cfg.relay.retries, 2);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = parse("[pricing]\nslogan_surcharge = 60\n").expect("parse");
        assert_eq!(cfg.pricing.base_price, 249);
        assert_eq!(cfg.pricing.slogan_surcharge, 60);
    }

    #[test]
    fn invalid_toml_returns_parse_error() {
        let result = parse("this is not valid toml ::::");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn zero_base_price_is_rejected() {
        let result = parse("[pricing]\nbase_price = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn blank_storage_key_is_rejected() {
        let result = parse("[storage]\nkey = \"  \"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load(Path::new("/nonexistent/jerseylab/config.toml")).expect("defaults");
        assert_eq!(cfg.pricing, PricingConfig::default());
    }
}
