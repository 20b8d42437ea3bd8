//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while fetching or validating a video.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFprobe not found: {0}")]
    FfprobeNotFound(String),

    #[error("yt-dlp not found: {0}")]
    YtDlpNotFound(String),

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("Could not resolve {url}: {message}")]
    ResolveFailed { url: String, message: String },

    #[error("No suitable stream with both audio and video for {0}")]
    NoSuitableStream(String),

    #[error("Download failed: {message}")]
    DownloadFailed { message: String },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid video file: {0}")]
    InvalidVideo(String),
}

impl MediaError {
    /// Create a resolve failure error.
    pub fn resolve_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResolveFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a download failure error.
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }

    /// Create an invalid video error.
    pub fn invalid_video(message: impl Into<String>) -> Self {
        Self::InvalidVideo(message.into())
    }
}
