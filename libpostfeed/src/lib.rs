//! Postfeed - a post list and composer over a REST post service
//!
//! This library holds everything the Postfeed binaries share: the data
//! model, the remote post service client, configuration, logging and the
//! service facade that reports progress through an event bus.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use client::PostClient;
pub use config::Config;
pub use error::{PostfeedError, Result, ServiceError};
pub use service::FeedService;
pub use types::{Draft, Post};
