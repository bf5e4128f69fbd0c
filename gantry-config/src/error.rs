// Error types for configuration management

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// Lets application code propagate configuration failures with `?` from a
// function returning the container's error type.
impl From<ConfigError> for gantry_core::Error {
    fn from(err: ConfigError) -> Self {
        gantry_core::Error::ConfigLoad(err.to_string())
    }
}
