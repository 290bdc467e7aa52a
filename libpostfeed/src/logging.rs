//! Centralized logging configuration for the Postfeed binaries
//!
//! Provides consistent logging setup with support for:
//! - Text, JSON, and pretty-printed output
//! - Environment variable configuration
//! - Logging to stderr (CLI) or to a file (TUI, which owns the terminal)
//!
//! # Examples
//!
//! ```no_run
//! use libpostfeed::logging::{LoggingConfig, LogFormat};
//!
//! // Initialize with JSON format
//! let config = LoggingConfig::new(LogFormat::Json, "info".to_string(), false);
//! config.init();
//!
//! // Or take the settings from POSTFEED_LOG_FORMAT / POSTFEED_LOG_LEVEL
//! libpostfeed::logging::from_env(false).init();
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output (no colors, for piping)
    Text,
    /// Machine-parseable JSON (one JSON object per line)
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Configuration for logging initialization
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub verbose: bool,
}

impl LoggingConfig {
    /// Create a new logging configuration
    ///
    /// # Arguments
    ///
    /// * `format` - Log output format (text, json, or pretty)
    /// * `level` - Minimum log level (error, warn, info, debug, trace)
    /// * `verbose` - If true, defaults to debug level
    pub fn new(format: LogFormat, level: String, verbose: bool) -> Self {
        Self {
            format,
            level,
            verbose,
        }
    }

    /// Initialize logging to stderr with the configured settings
    ///
    /// This should be called once at the start of your program.
    ///
    /// # Panics
    ///
    /// Panics if the logging subscriber has already been initialized
    pub fn init(&self) {
        self.install(std::io::stderr, true);
    }

    /// Initialize logging into a file, appending to it if it exists
    ///
    /// Used by the TUI: anything written to stderr would corrupt the
    /// alternate screen.
    pub fn init_with_file(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.install(Mutex::new(file), false);
        Ok(())
    }

    fn filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
        }
    }

    fn install<W>(&self, writer: W, ansi: bool)
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = self.filter();

        match self.format {
            LogFormat::Json => {
                // One JSON object per line
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::fmt()
                    .pretty()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .init();
            }
            LogFormat::Text => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(false)
                    .with_level(true)
                    .init();
            }
        }
    }
}

/// Build a logging configuration from the `POSTFEED_LOG_*` variables
///
/// Falls back to text format at info level when they are unset.
///
/// ```bash
/// export POSTFEED_LOG_FORMAT=json
/// export POSTFEED_LOG_LEVEL=debug
/// postfeed list
/// ```
pub fn from_env(verbose: bool) -> LoggingConfig {
    let format = std::env::var("POSTFEED_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let level = std::env::var("POSTFEED_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    LoggingConfig::new(format, level, verbose)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);

        // Case insensitive
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("PRETTY".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    }

    #[test]
    fn test_log_format_from_str_invalid() {
        let result = "invalid".parse::<LogFormat>();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .contains("Invalid log format: 'invalid'"));
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(LogFormat::Text.to_string(), "text");
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogFormat::Pretty.to_string(), "pretty");
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env() {
        std::env::set_var("POSTFEED_LOG_FORMAT", "json");
        std::env::set_var("POSTFEED_LOG_LEVEL", "warn");
        let config = from_env(false);
        std::env::remove_var("POSTFEED_LOG_FORMAT");
        std::env::remove_var("POSTFEED_LOG_LEVEL");

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "warn");
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_ignores_bad_format() {
        std::env::set_var("POSTFEED_LOG_FORMAT", "xml");
        let config = from_env(true);
        std::env::remove_var("POSTFEED_LOG_FORMAT");

        assert_eq!(config.format, LogFormat::Text);
        assert!(config.verbose);
    }

    #[test]
    fn test_logging_config_new() {
        let config = LoggingConfig::new(LogFormat::Json, "debug".to_string(), true);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "debug");
        assert!(config.verbose);
    }
}
