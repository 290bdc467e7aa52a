//! HTTP implementation of the remote post service
//!
//! Speaks the JSONPlaceholder-style REST dialect:
//!
//! - `GET  {base}/posts?_limit={n}` returns a JSON array of posts
//! - `POST {base}/posts` with a `{"title", "body"}` JSON body returns the
//!   created post

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use crate::client::PostClient;
use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::types::{Draft, Post};

/// REST client for the remote post service
#[derive(Debug, Clone)]
pub struct HttpPostClient {
    client: Client,
    base_url: String,
}

impl HttpPostClient {
    /// Build a client from service settings
    ///
    /// Every request carries the configured timeout so a hung call surfaces
    /// as `ServiceError::Timeout` instead of blocking its caller forever.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Collection endpoint for posts
    pub fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }
}

/// Turn a non-2xx response into `ServiceError::Status`, keeping the body as context
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let reason = status.canonical_reason().unwrap_or("Unknown status");
    let message = if body.trim().is_empty() {
        reason.to_string()
    } else {
        format!("{}: {}", reason, body.trim())
    };

    Err(ServiceError::Status {
        status: status.as_u16(),
        message,
    }
    .into())
}

#[async_trait]
impl PostClient for HttpPostClient {
    async fn list_posts(&self, limit: usize) -> Result<Vec<Post>> {
        let url = self.posts_url();
        debug!("GET {} (_limit={})", url, limit);

        let response = self
            .client
            .get(&url)
            .query(&[("_limit", limit)])
            .send()
            .await?;

        let posts: Vec<Post> = check_status(response).await?.json().await?;
        Ok(posts)
    }

    async fn create_post(&self, draft: &Draft) -> Result<Post> {
        let url = self.posts_url();
        debug!("POST {}", url);

        // .json() sets Content-Type: application/json
        let response = self.client.post(&url).json(draft).send().await?;

        let post: Post = check_status(response).await?.json().await?;
        Ok(post)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_url_strips_trailing_slash() {
        let config = ServiceConfig {
            base_url: "http://localhost:3000/".to_string(),
            timeout_secs: 5,
        };
        let client = HttpPostClient::new(&config).unwrap();

        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.posts_url(), "http://localhost:3000/posts");
    }

    #[test]
    fn test_default_service_url() {
        let client = HttpPostClient::new(&ServiceConfig::default()).unwrap();
        assert_eq!(
            client.posts_url(),
            "https://jsonplaceholder.typicode.com/posts"
        );
        assert_eq!(client.name(), "http");
    }
}
