//! Mock post client for testing
//!
//! A configurable in-memory stand-in for the remote post service. It can
//! simulate successes, failures and latency, and records every call so tests
//! can assert on how the feed used it. Cloning a `MockPostClient` shares its
//! recorded state, so a test can keep one clone while handing another to the
//! service under test.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::client::PostClient;
use crate::error::{Result, ServiceError};
use crate::types::{Draft, Post};

/// First id handed out by `create_post`, matching the placeholder service
pub const FIRST_CREATED_ID: u64 = 101;

/// Configuration for mock client behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Client name reported through `PostClient::name` (fixed at construction)
    pub name: String,

    /// Posts available on the "server"
    pub posts: Vec<Post>,

    /// Error returned by `list_posts`, if any
    pub list_error: Option<ServiceError>,

    /// Error returned by `create_post`, if any
    pub create_error: Option<ServiceError>,

    /// Delay before completing operations (simulates network latency)
    pub delay: Duration,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            posts: Vec::new(),
            list_error: None,
            create_error: None,
            delay: Duration::from_millis(0),
        }
    }
}

#[derive(Debug)]
struct MockState {
    next_id: u64,
    list_limits: Vec<usize>,
    created: Vec<Draft>,
    create_call_count: usize,
}

/// Mock post service
#[derive(Debug, Clone)]
pub struct MockPostClient {
    name: String,
    config: Arc<Mutex<MockConfig>>,
    state: Arc<Mutex<MockState>>,
}

impl MockPostClient {
    /// Create a new mock client with the given configuration
    pub fn new(config: MockConfig) -> Self {
        Self {
            name: config.name.clone(),
            config: Arc::new(Mutex::new(config)),
            state: Arc::new(Mutex::new(MockState {
                next_id: FIRST_CREATED_ID,
                list_limits: Vec::new(),
                created: Vec::new(),
                create_call_count: 0,
            })),
        }
    }

    /// Create a mock serving exactly these posts
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self::new(MockConfig {
            posts,
            ..Default::default()
        })
    }

    /// Create a mock serving `count` generated posts with ids `1..=count`
    pub fn sample(count: u64) -> Self {
        Self::with_posts(sample_posts(count))
    }

    /// Create a mock whose list call always fails
    pub fn list_failure(error: ServiceError) -> Self {
        Self::new(MockConfig {
            list_error: Some(error),
            ..Default::default()
        })
    }

    /// Create a mock whose create call always fails
    pub fn create_failure(posts: Vec<Post>, error: ServiceError) -> Self {
        Self::new(MockConfig {
            posts,
            create_error: Some(error),
            ..Default::default()
        })
    }

    /// Create a mock that answers every call after a delay
    pub fn with_delay(posts: Vec<Post>, delay: Duration) -> Self {
        Self::new(MockConfig {
            posts,
            delay,
            ..Default::default()
        })
    }

    /// Replace the posts the "server" holds
    pub fn set_posts(&self, posts: Vec<Post>) {
        self.config.lock().unwrap().posts = posts;
    }

    /// Make subsequent list calls fail (or succeed again with `None`)
    pub fn set_list_error(&self, error: Option<ServiceError>) {
        self.config.lock().unwrap().list_error = error;
    }

    /// Make subsequent create calls fail (or succeed again with `None`)
    pub fn set_create_error(&self, error: Option<ServiceError>) {
        self.config.lock().unwrap().create_error = error;
    }

    /// Number of times `list_posts` was called
    pub fn list_call_count(&self) -> usize {
        self.state.lock().unwrap().list_limits.len()
    }

    /// Limits passed to `list_posts`, in call order
    pub fn list_limits(&self) -> Vec<usize> {
        self.state.lock().unwrap().list_limits.clone()
    }

    /// Number of times `create_post` was called
    pub fn create_call_count(&self) -> usize {
        self.state.lock().unwrap().create_call_count
    }

    /// Drafts that were successfully created, in call order
    pub fn created_drafts(&self) -> Vec<Draft> {
        self.state.lock().unwrap().created.clone()
    }

    fn snapshot(&self) -> MockConfig {
        self.config.lock().unwrap().clone()
    }
}

/// Generate posts `1..=count` with predictable titles and bodies
pub fn sample_posts(count: u64) -> Vec<Post> {
    (1..=count)
        .map(|id| Post::new(id, format!("Post {}", id), format!("Body of post {}", id)))
        .collect()
}

#[async_trait]
impl PostClient for MockPostClient {
    async fn list_posts(&self, limit: usize) -> Result<Vec<Post>> {
        self.state.lock().unwrap().list_limits.push(limit);

        let config = self.snapshot();
        if !config.delay.is_zero() {
            sleep(config.delay).await;
        }

        match config.list_error {
            Some(error) => Err(error.into()),
            None => Ok(config.posts.into_iter().take(limit).collect()),
        }
    }

    async fn create_post(&self, draft: &Draft) -> Result<Post> {
        self.state.lock().unwrap().create_call_count += 1;

        let config = self.snapshot();
        if !config.delay.is_zero() {
            sleep(config.delay).await;
        }

        if let Some(error) = config.create_error {
            return Err(error.into());
        }

        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.created.push(draft.clone());

        Ok(Post::new(id, draft.title.clone(), draft.body.clone()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
