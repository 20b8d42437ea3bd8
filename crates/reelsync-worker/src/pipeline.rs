//! Per-record pipeline: download → validate → upload → register.
//!
//! Every stage failure is contained to its record. A record that got as far
//! as a complete download always yields an [`ExtractedRecord`], whatever
//! happens to it afterwards.

use std::path::PathBuf;
use std::sync::Arc;

use reelsync_models::{ExtractedRecord, InputRecord, VideoAsset};

use crate::error::PipelineError;
use crate::logging::RecordLogger;
use crate::stages::{PlayabilityProbe, PostRegistrar, VideoDownloader, VideoUploader};

/// Result of pushing one record through the pipeline.
#[derive(Debug)]
pub struct RecordResult {
    pub outcome: Result<VideoAsset, PipelineError>,
    pub extracted: Option<ExtractedRecord>,
}

impl RecordResult {
    fn failed(error: PipelineError) -> Self {
        Self {
            outcome: Err(error),
            extracted: None,
        }
    }
}

/// The four collaborators plus where files land.
#[derive(Clone)]
pub struct Pipeline {
    downloader: Arc<dyn VideoDownloader>,
    probe: Arc<dyn PlayabilityProbe>,
    uploader: Arc<dyn VideoUploader>,
    registrar: Arc<dyn PostRegistrar>,
    output_root: PathBuf,
}

impl Pipeline {
    pub fn new(
        downloader: Arc<dyn VideoDownloader>,
        probe: Arc<dyn PlayabilityProbe>,
        uploader: Arc<dyn VideoUploader>,
        registrar: Arc<dyn PostRegistrar>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            downloader,
            probe,
            uploader,
            registrar,
            output_root: output_root.into(),
        }
    }

    /// Run one record to a terminal state.
    pub async fn process(&self, record: &InputRecord, logger: &RecordLogger) -> RecordResult {
        let output_dir = record.output_dir(&self.output_root);
        if let Err(source) = tokio::fs::create_dir_all(&output_dir).await {
            return RecordResult::failed(PipelineError::OutputDir {
                path: output_dir,
                source,
            });
        }

        logger.log_progress(&format!("Downloading video from URL: {}", record.url));

        let asset = match self.downloader.download(&record.url, &output_dir).await {
            Ok(asset) => asset,
            Err(source) => {
                return RecordResult::failed(PipelineError::Download {
                    url: record.url.clone(),
                    source,
                })
            }
        };

        if !asset.is_complete() {
            let missing = asset.missing_fields().join(", ");
            logger.log_warning(&format!("Downloaded {} without {}", asset.filename, missing));
            return RecordResult::failed(PipelineError::IncompleteDownload {
                url: record.url.clone(),
                missing,
            });
        }

        let extracted = ExtractedRecord::new(record, &asset);
        let outcome = self.deliver(record, asset).await;

        RecordResult {
            outcome,
            extracted: Some(extracted),
        }
    }

    /// Validate, upload and register a downloaded asset.
    async fn deliver(
        &self,
        record: &InputRecord,
        asset: VideoAsset,
    ) -> Result<VideoAsset, PipelineError> {
        if !self.probe.is_playable(&asset.filepath).await {
            return Err(PipelineError::Unplayable {
                filename: asset.filename,
            });
        }

        if let Err(source) = self.uploader.upload(&asset.filename, &asset.filepath).await {
            return Err(PipelineError::Upload {
                filename: asset.filename,
                source,
            });
        }

        if let Err(source) = self.registrar.register(record, &asset).await {
            return Err(PipelineError::Publish {
                filename: asset.filename,
                source,
            });
        }

        Ok(asset)
    }
}
