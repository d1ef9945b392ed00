use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("cannot read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Values parsed but are unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}
