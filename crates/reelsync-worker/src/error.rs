//! Pipeline error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use reelsync_media::MediaError;
use reelsync_models::LineParseError;
use reelsync_posts::PostError;
use reelsync_storage::StorageError;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Why a record failed, or why the run could not proceed.
///
/// Per-record variants are counted as failures and the batch moves on;
/// the rest abort the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Skipping line due to incorrect format: {0}")]
    MalformedLine(#[from] LineParseError),

    #[error("Could not create output folder {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to download video from URL {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: MediaError,
    },

    #[error("Download of {url} is missing {missing}")]
    IncompleteDownload { url: String, missing: String },

    #[error("Video {filename} is not playable and will not be uploaded")]
    Unplayable { filename: String },

    #[error("Error uploading video {filename}: {source}")]
    Upload {
        filename: String,
        #[source]
        source: StorageError,
    },

    #[error("Error registering video {filename}: {source}")]
    Publish {
        filename: String,
        #[source]
        source: PostError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report error: {0}")]
    Report(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pipeline stage a record stopped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Download,
    Playability,
    Upload,
    Publish,
    Run,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Parse => "parse",
            Stage::Download => "download",
            Stage::Playability => "playability",
            Stage::Upload => "upload",
            Stage::Publish => "publish",
            Stage::Run => "run",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PipelineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stage the error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::MalformedLine(_) => Stage::Parse,
            PipelineError::OutputDir { .. }
            | PipelineError::Download { .. }
            | PipelineError::IncompleteDownload { .. } => Stage::Download,
            PipelineError::Unplayable { .. } => Stage::Playability,
            PipelineError::Upload { .. } => Stage::Upload,
            PipelineError::Publish { .. } => Stage::Publish,
            PipelineError::Config(_) | PipelineError::Report(_) | PipelineError::Io(_) => {
                Stage::Run
            }
        }
    }
}
