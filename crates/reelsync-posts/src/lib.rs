//! Client for the content API.
//!
//! Registering a video is two remote calls: a fresh view-count lookup on the
//! source platform, then a JSON POST describing the uploaded file.

pub mod client;
pub mod error;
pub mod publisher;
pub mod types;

pub use client::{PostsClient, PostsConfig};
pub use error::{PostError, PostResult};
pub use publisher::PostPublisher;
pub use types::PostPayload;
