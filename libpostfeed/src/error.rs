//! Error types for Postfeed

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PostfeedError>;

#[derive(Error, Debug)]
pub enum PostfeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PostfeedError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PostfeedError::InvalidInput(_) => 3,
            PostfeedError::Service(_) => 1,
            PostfeedError::Config(_) => 1,
        }
    }
}

impl From<reqwest::Error> for PostfeedError {
    fn from(err: reqwest::Error) -> Self {
        PostfeedError::Service(err.into())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Failures talking to the remote post service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout(err.to_string())
        } else if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ServiceError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Decode(err.to_string())
    }
}
