//! yt-dlp and FFprobe wrappers.
//!
//! This crate provides:
//! - Metadata resolution and progressive-stream download via yt-dlp
//! - Renaming to `{video_id}_{timestamp}.mp4` plus a metadata sidecar
//! - Single-frame playability checks via FFprobe

pub mod config;
pub mod download;
pub mod error;
pub mod playability;

pub use config::MediaConfig;
pub use download::{
    select_stream, write_metadata_sidecar, FormatInfo, VideoInfo, VideoResolver, YtDlp,
};
pub use error::{MediaError, MediaResult};
pub use playability::{FrameCheck, PlayabilityChecker};
