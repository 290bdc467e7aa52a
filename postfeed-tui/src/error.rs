//! Error types for postfeed-tui
//!
//! Provides TUI-specific error types that wrap service layer errors
//! and terminal/IO errors for unified error handling.

use thiserror::Error;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    /// Service layer error
    #[error("Service error: {0}")]
    Service(#[from] libpostfeed::PostfeedError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl TuiError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TuiError::Service(e) => e.exit_code(),
            TuiError::Terminal(_) => 1,
        }
    }
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use libpostfeed::error::ConfigError;
    use libpostfeed::PostfeedError;

    #[test]
    fn test_service_error_keeps_exit_code() {
        let err: TuiError = PostfeedError::InvalidInput("bad".to_string()).into();
        assert_eq!(err.exit_code(), 3);

        let err: TuiError =
            PostfeedError::from(ConfigError::MissingField("service.base_url".to_string())).into();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("service.base_url"));
    }
}
