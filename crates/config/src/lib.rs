// Provider configuration
// Loaded from ~/.config/gsheets/config.toml, overridden by GSHEETS_* env vars

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{ProviderConfig, RangeDeleteMode, DEFAULT_ENDPOINT, ENV_ACCESS_TOKEN, ENV_ENDPOINT};
