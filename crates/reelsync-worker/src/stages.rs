//! Seams between the orchestrator and its collaborators.
//!
//! Each pipeline stage is a trait so the orchestrator can be driven by the
//! real yt-dlp/FFprobe/HTTP clients in production and by fakes in tests.

use std::path::Path;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use reelsync_media::{MediaResult, PlayabilityChecker, VideoResolver, YtDlp};
use reelsync_models::{InputRecord, VideoAsset};
use reelsync_posts::{PostPublisher, PostResult};
use reelsync_storage::{StorageClient, StorageResult};

/// Fetches a video into a folder.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VideoDownloader: Send + Sync {
    async fn download(&self, url: &str, output_dir: &Path) -> MediaResult<VideoAsset>;
}

/// Confirms a file decodes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlayabilityProbe: Send + Sync {
    async fn is_playable(&self, path: &Path) -> bool;
}

/// Stores a file remotely under its file name.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VideoUploader: Send + Sync {
    async fn upload(&self, filename: &str, path: &Path) -> StorageResult<()>;
}

/// Registers an uploaded video with the content API.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostRegistrar: Send + Sync {
    async fn register(&self, record: &InputRecord, asset: &VideoAsset) -> PostResult<()>;
}

#[async_trait]
impl VideoDownloader for YtDlp {
    async fn download(&self, url: &str, output_dir: &Path) -> MediaResult<VideoAsset> {
        YtDlp::download(self, url, output_dir).await
    }
}

#[async_trait]
impl PlayabilityProbe for PlayabilityChecker {
    async fn is_playable(&self, path: &Path) -> bool {
        PlayabilityChecker::is_playable(self, path).await
    }
}

#[async_trait]
impl VideoUploader for StorageClient {
    async fn upload(&self, filename: &str, path: &Path) -> StorageResult<()> {
        self.upload_file(filename, path).await
    }
}

#[async_trait]
impl<R: VideoResolver> PostRegistrar for PostPublisher<R> {
    async fn register(&self, record: &InputRecord, asset: &VideoAsset) -> PostResult<()> {
        self.publish(
            &asset.title,
            &asset.description,
            &record.category,
            &record.subcategory,
            &asset.filename,
        )
        .await
    }
}
