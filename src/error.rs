use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("HR API error: {0}")]
    #[diagnostic(code(workmate::hr_api))]
    HrApi(String),

    #[error("Authentication error: {0}")]
    #[diagnostic(code(workmate::auth))]
    Auth(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(workmate::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(workmate::config))]
    Config(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(workmate::component))]
    Component(String),

    #[error("Validation error: {0}")]
    #[diagnostic(code(workmate::validation))]
    Validation(String),

    #[error(transparent)]
    #[diagnostic(code(workmate::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(workmate::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(workmate::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for JSON errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
#[allow(dead_code)]
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create HR API errors
pub fn hr_api_error(message: &str) -> Error {
    Error::HrApi(message.to_string())
}

/// Helper to create authentication errors
pub fn auth_error(message: &str) -> Error {
    Error::Auth(message.to_string())
}
