//! Remote post service abstraction
//!
//! The feed only ever needs two calls from the remote service: list the most
//! recent posts up to a limit, and create a post from a draft. `PostClient`
//! is that seam; `HttpPostClient` talks to a JSON REST endpoint and
//! `MockPostClient` stands in for it in tests.
//!
//! # Examples
//!
//! ```no_run
//! use libpostfeed::client::{PostClient, http::HttpPostClient};
//! use libpostfeed::config::ServiceConfig;
//! use libpostfeed::Draft;
//!
//! # async fn example() -> libpostfeed::Result<()> {
//! let client = HttpPostClient::new(&ServiceConfig::default())?;
//!
//! let posts = client.list_posts(10).await?;
//! println!("Fetched {} posts", posts.len());
//!
//! let created = client.create_post(&Draft::new("Hello", "World")).await?;
//! println!("Created post {}", created.id);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Draft, Post};

pub mod http;

// Mock client is available for all builds (not just tests) to support integration tests
pub mod mock;

/// Remote post service operations consumed by the feed
#[async_trait]
pub trait PostClient: Send + Sync {
    /// Fetch up to `limit` posts
    ///
    /// The service decides which posts are returned; the result holds at most
    /// `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` on transport failure, timeout, a non-2xx status
    /// or a body that does not decode as a list of posts.
    async fn list_posts(&self, limit: usize) -> Result<Vec<Post>>;

    /// Create a post from a draft and return the service's copy of it
    ///
    /// The draft is sent as-is, without validation.
    async fn create_post(&self, draft: &Draft) -> Result<Post>;

    /// Short identifier used in logs (e.g. "http", "mock")
    fn name(&self) -> &str;
}
