//! Storage-zone client implementation.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};

const DEFAULT_BASE_URL: &str = "https://storage.bunnycdn.com/kaptivate/prod/";

/// Configuration for the storage client.
#[derive(Clone)]
pub struct StorageConfig {
    /// Base URL objects are written under; the file name is appended
    pub base_url: String,
    /// Value of the `AccessKey` header
    pub access_key: String,
    /// Overall request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl StorageConfig {
    pub fn new(base_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_key: access_key.into(),
            timeout: None,
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        let access_key = std::env::var("STORAGE_ACCESS_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StorageError::config_error("STORAGE_ACCESS_KEY not set"))?;

        Ok(Self {
            base_url: std::env::var("STORAGE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            access_key,
            timeout: std::env::var("STORAGE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        })
    }

    /// Full URL for an object key.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("base_url", &self.base_url)
            .field("access_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Uploads whole files to the storage zone.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: Client,
    config: StorageConfig,
}

impl StorageClient {
    /// Create a new client from configuration.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Self::new(StorageConfig::from_env()?)
    }

    /// Read `path` fully into memory and PUT it under `key`.
    pub async fn upload_file(&self, key: &str, path: impl AsRef<Path>) -> StorageResult<()> {
        let path = path.as_ref();
        debug!("Uploading {} to {}", path.display(), key);

        let data = tokio::fs::read(path).await?;
        self.upload_bytes(key, data).await?;

        info!("Video {} uploaded successfully", key);
        Ok(())
    }

    /// PUT raw bytes under `key`. Succeeds only on `201 Created`.
    pub async fn upload_bytes(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        let url = self.config.object_url(key);
        debug!(url = %url, bytes = data.len(), "PUT object");

        let response = self
            .http
            .put(&url)
            .header("AccessKey", &self.config.access_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            warn!("Error uploading video {}: {}", key, status);
            return Err(StorageError::unexpected_status(key, status.as_u16()));
        }

        Ok(())
    }
}
