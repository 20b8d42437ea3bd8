//! Content API error types.

use thiserror::Error;

pub type PostResult<T> = Result<T, PostError>;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("Cannot derive a video id from file name {0:?}")]
    InvalidSource(String),

    #[error("View count lookup failed: {0}")]
    ViewsLookup(String),

    #[error("Post for {source_name} rejected with HTTP {status}")]
    UnexpectedStatus { source_name: String, status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl PostError {
    pub fn views_lookup(msg: impl Into<String>) -> Self {
        Self::ViewsLookup(msg.into())
    }
}
