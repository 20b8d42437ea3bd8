//! Content API HTTP client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::error::{PostError, PostResult};
use crate::types::PostPayload;

const DEFAULT_ENDPOINT: &str =
    "https://lwbauabdrh.execute-api.ap-south-1.amazonaws.com/prod/create-post/";

/// Configuration for the posts client.
#[derive(Debug, Clone)]
pub struct PostsConfig {
    /// Create-post endpoint
    pub endpoint: String,
    /// Overall request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl PostsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("POSTS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            timeout: std::env::var("POSTS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }
}

/// Client for the create-post endpoint.
#[derive(Debug, Clone)]
pub struct PostsClient {
    http: Client,
    config: PostsConfig,
}

impl PostsClient {
    pub fn new(config: PostsConfig) -> PostResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(PostError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> PostResult<Self> {
        Self::new(PostsConfig::from_env())
    }

    /// POST one payload. Succeeds only on `200 OK`.
    pub async fn create_post(&self, payload: &PostPayload) -> PostResult<()> {
        debug!(endpoint = %self.config.endpoint, source = %payload.source, "Sending create-post request");

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!("Error registering video {}: {} {}", payload.source, status, body);
            return Err(PostError::UnexpectedStatus {
                source_name: payload.source.clone(),
                status: status.as_u16(),
            });
        }

        info!("Video {} registered successfully", payload.source);
        Ok(())
    }
}
