use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::auth::{Account, StaticAuthenticator};

use super::options::UiOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML configuration")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSection {
    pub tick_rate_ms: u64,
    pub show_help: bool,
    pub confirm_exit: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            show_help: true,
            confirm_exit: true,
        }
    }
}

/// ```toml
/// [ui]
/// tick_rate_ms = 250
///
/// [[accounts]]
/// name = "Ana"
/// email = "ana@example.com"
/// password = "123456"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiSection,
    pub accounts: Vec<Account>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ui: UiSection::default(),
            accounts: vec![Account {
                name: "Demo".to_string(),
                email: "demo@formbridge.dev".to_string(),
                password: "123456".to_string(),
            }],
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("ui.tick_rate_ms must be positive".into()));
        }
        let mut seen = HashSet::new();
        for account in &self.accounts {
            if account.email.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "account '{}' has no email",
                    account.name
                )));
            }
            if !seen.insert(account.email.to_ascii_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate account email '{}'",
                    account.email
                )));
            }
        }
        Ok(())
    }

    pub fn ui_options(&self) -> UiOptions {
        UiOptions::default()
            .with_tick_rate(Duration::from_millis(self.ui.tick_rate_ms))
            .with_help(self.ui.show_help)
            .with_confirm_exit(self.ui.confirm_exit)
    }

    pub fn authenticator(&self) -> StaticAuthenticator {
        StaticAuthenticator::new(self.accounts.clone())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Invalid(err.to_string()))
    }
}
