//! Service layer for Postfeed
//!
//! This module provides a clean, testable API over the remote post service
//! that can be consumed by multiple interfaces (CLI, TUI) without code
//! duplication.
//!
//! # Architecture
//!
//! `FeedService` is the facade. It wraps a `PostClient`, knows the fetch
//! limits for the initial load and for a refresh, and reports every remote
//! call on an `EventBus`:
//!
//! - `ListStarted` / `ListCompleted` / `ListFailed` for list requests, tagged
//!   with the caller's sequence number
//! - `CreateStarted` / `CreateCompleted` / `CreateFailed` for create requests
//!
//! # Example
//!
//! ```no_run
//! use libpostfeed::service::FeedService;
//! use libpostfeed::Draft;
//!
//! # async fn example() -> libpostfeed::Result<()> {
//! let service = FeedService::new()?;
//!
//! let posts = service.load_initial(1).await?;
//! println!("Loaded {} posts", posts.len());
//!
//! let post = service.create_post("req-1", Draft::new("Hello", "World")).await?;
//! println!("Created post {}", post.id);
//! # Ok(())
//! # }
//! ```

pub mod events;

use std::sync::Arc;
use tracing::{debug, info, warn};

use self::events::{Event, EventBus, EventReceiver};
use crate::client::http::HttpPostClient;
use crate::client::PostClient;
use crate::config::FeedConfig;
use crate::error::PostfeedError;
use crate::types::{Draft, Post};
use crate::{Config, Result};

/// Capacity of the event bus per subscriber
const EVENT_BUS_CAPACITY: usize = 100;

/// Main service facade over the remote post service
///
/// Cheap to clone: clones share the client and the event bus.
#[derive(Clone)]
pub struct FeedService {
    client: Arc<dyn PostClient>,
    feed: FeedConfig,
    event_bus: EventBus,
}

impl FeedService {
    /// Create a new service with configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration cannot be loaded or is invalid
    /// - The HTTP client cannot be built
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(&config)
    }

    /// Create a service talking HTTP to the configured endpoint
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HttpPostClient::new(&config.service)?;
        info!("Using post service at {}", client.base_url());
        Ok(Self::with_client(Arc::new(client), config.feed))
    }

    /// Create a service over any client
    ///
    /// This is how tests plug in `MockPostClient`.
    pub fn with_client(client: Arc<dyn PostClient>, feed: FeedConfig) -> Self {
        Self {
            client,
            feed,
            event_bus: EventBus::new(EVENT_BUS_CAPACITY),
        }
    }

    /// Name of the underlying client
    pub fn client_name(&self) -> &str {
        self.client.name()
    }

    /// Fetch up to `limit` posts
    ///
    /// Emits `ListStarted`, then `ListCompleted` or `ListFailed`, all tagged
    /// with `request_id`.
    ///
    /// # Errors
    ///
    /// Returns `PostfeedError::InvalidInput` for a zero limit, otherwise
    /// whatever the client reports.
    pub async fn list_posts(&self, request_id: u64, limit: usize) -> Result<Vec<Post>> {
        if limit == 0 {
            return Err(PostfeedError::InvalidInput(
                "Limit must be greater than zero".to_string(),
            ));
        }

        self.event_bus.emit(Event::ListStarted { request_id, limit });
        debug!(request_id, limit, client = self.client.name(), "Listing posts");

        match self.client.list_posts(limit).await {
            Ok(posts) => {
                info!(request_id, count = posts.len(), "Posts loaded");
                self.event_bus.emit(Event::ListCompleted {
                    request_id,
                    posts: posts.clone(),
                });
                Ok(posts)
            }
            Err(e) => {
                warn!(request_id, "Listing posts failed: {}", e);
                self.event_bus.emit(Event::ListFailed {
                    request_id,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Initial load, using the configured initial limit (10 by default)
    pub async fn load_initial(&self, request_id: u64) -> Result<Vec<Post>> {
        self.list_posts(request_id, self.feed.initial_limit).await
    }

    /// Full reload, using the configured refresh limit (20 by default)
    pub async fn refresh(&self, request_id: u64) -> Result<Vec<Post>> {
        self.list_posts(request_id, self.feed.refresh_limit).await
    }

    /// Create a post from a draft
    ///
    /// The draft is sent as-is. Emits `CreateStarted`, then
    /// `CreateCompleted` or `CreateFailed`, all tagged with `request_id`.
    pub async fn create_post(&self, request_id: &str, draft: Draft) -> Result<Post> {
        self.event_bus.emit(Event::CreateStarted {
            request_id: request_id.to_string(),
            draft: draft.clone(),
        });
        debug!(request_id, client = self.client.name(), "Creating post");

        match self.client.create_post(&draft).await {
            Ok(post) => {
                info!(request_id, post_id = post.id, "Post created");
                self.event_bus.emit(Event::CreateCompleted {
                    request_id: request_id.to_string(),
                    post: post.clone(),
                });
                Ok(post)
            }
            Err(e) => {
                warn!(request_id, "Creating post failed: {}", e);
                self.event_bus.emit(Event::CreateFailed {
                    request_id: request_id.to_string(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Subscribe to service events
    ///
    /// Returns a receiver that will receive every event emitted after this
    /// call. Multiple subscribers are supported.
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }
}
