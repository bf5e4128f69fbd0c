// Error types for the Gantry container

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration load error: {0}")]
    ConfigLoad(String),

    #[error("Component discovery error: {0}")]
    Discovery(String),

    #[error("Duplicate bean name: {0}")]
    DuplicateBean(String),

    #[error("Bean instantiation error: {0}")]
    Instantiation(String),

    #[error("Dependency injection error: {0}")]
    DependencyInjection(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Parameter binding error: {0}")]
    ParameterBinding(String),

    #[error("Handler invocation error: {0}")]
    Invocation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::RouteNotFound(_) => 404,
            Error::ParameterBinding(_) => 400,
            Error::Invocation(_) => 500,
            _ => 500,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }
}
