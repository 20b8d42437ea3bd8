//! Downloaded video assets.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::record::InputRecord;

/// A video that has been downloaded, renamed and described on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoAsset {
    /// Sanitized title
    pub title: String,
    /// Sanitized description
    pub description: String,
    /// Platform video identifier
    pub video_id: String,
    /// File name, `{video_id}_{timestamp}.mp4`
    pub filename: String,
    /// Full path of the renamed file
    pub filepath: PathBuf,
}

impl VideoAsset {
    /// Whether every field carries a value.
    ///
    /// The pipeline only continues with complete assets; a video whose title
    /// or description sanitizes down to nothing counts as a failed download.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.description.is_empty()
            && !self.video_id.is_empty()
            && !self.filename.is_empty()
            && !self.filepath.as_os_str().is_empty()
    }

    /// Names of the empty fields, for log messages.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_empty() {
            missing.push("title");
        }
        if self.description.is_empty() {
            missing.push("description");
        }
        if self.video_id.is_empty() {
            missing.push("video_id");
        }
        if self.filename.is_empty() {
            missing.push("filename");
        }
        if self.filepath.as_os_str().is_empty() {
            missing.push("filepath");
        }
        missing
    }
}

/// Input record joined with its downloaded asset.
///
/// Column names match the extracted-data CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Subcategory")]
    pub subcategory: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Video ID")]
    pub video_id: String,
}

impl ExtractedRecord {
    pub fn new(record: &InputRecord, asset: &VideoAsset) -> Self {
        Self {
            url: record.url.clone(),
            category: record.category.clone(),
            subcategory: record.subcategory.clone(),
            title: asset.title.clone(),
            description: asset.description.clone(),
            video_id: asset.video_id.clone(),
        }
    }
}
