//! Storage-zone upload client.
//!
//! Files are PUT whole, keyed by file name, under a fixed base URL with an
//! `AccessKey` header. Only `201 Created` counts as a successful upload.

pub mod client;
pub mod error;

pub use client::{StorageClient, StorageConfig};
pub use error::{StorageError, StorageResult};
