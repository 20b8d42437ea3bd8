//! Batch orchestrator for the reelsync pipeline.
//!
//! This crate provides:
//! - Stage traits over the downloader, playability check, uploader and publisher
//! - The per-record pipeline and its failure containment
//! - The batch runner, report and extracted-record sinks
//! - Configuration and structured logging

pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod stages;

pub use batch::{BatchRunner, BatchSummary, RecordSummary};
pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult, Stage};
pub use logging::{init_tracing, RecordLogger};
pub use pipeline::{Pipeline, RecordResult};
pub use report::{write_extracted, write_report};
pub use stages::{PlayabilityProbe, PostRegistrar, VideoDownloader, VideoUploader};
