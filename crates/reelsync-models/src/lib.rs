//! Shared data models for the reelsync pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Input records parsed from the batch file
//! - Downloaded video assets and the extracted-record join
//! - The end-of-run report
//! - Text sanitizing and file naming helpers

pub mod asset;
pub mod record;
pub mod report;
pub mod sanitize;
pub mod utils;

// Re-export common types
pub use asset::{ExtractedRecord, VideoAsset};
pub use record::{parse_line, InputRecord, LineParseError};
pub use report::Report;
pub use sanitize::clean_text;
pub use utils::{
    asset_filename, filename_timestamp, metadata_filename, video_id_from_filename, watch_url,
};
