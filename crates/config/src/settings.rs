// Provider settings
// Loaded from ~/.config/gsheets/config.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://sheets.googleapis.com/";
pub const ENV_ENDPOINT: &str = "GSHEETS_ENDPOINT";
pub const ENV_ACCESS_TOKEN: &str = "GSHEETS_ACCESS_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// How a managed range is released when its resource is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeDeleteMode {
    /// Write blanks over exactly the cells the resource declared (default)
    #[default]
    Blank,
    /// Clear the whole range expression, including cells never declared
    Clear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Sheets API base URL. Point this at a mock server in tests.
    pub endpoint: String,

    /// OAuth bearer token. Requests are sent unauthenticated when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Per-request timeout
    pub timeout_secs: u64,

    /// Overrides the default `gsheets/<version>` user agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    pub range_delete: RangeDeleteMode,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            range_delete: RangeDeleteMode::Blank,
        }
    }
}

impl ProviderConfig {
    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gsheets")
            .join("config.toml")
    }

    /// Load from the default path (defaults when it does not exist), then
    /// apply environment overrides and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        let mut config = if path.exists() {
            Self::read_file(&path)?
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Apply `GSHEETS_ENDPOINT` / `GSHEETS_ACCESS_TOKEN`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (env in production, a map in tests).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.access_token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be greater than 0".into()));
        }
        Ok(())
    }

    /// Effective user agent
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("gsheets/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Copy safe to print: the token is masked.
    pub fn redacted(&self) -> Self {
        Self {
            access_token: self.access_token.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}
