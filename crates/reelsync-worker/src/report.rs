//! CSV sinks for the run report and the extracted records.

use std::path::Path;

use tracing::info;

use reelsync_models::{ExtractedRecord, Report};

use crate::error::PipelineResult;

const EXTRACTED_HEADER: [&str; 6] = [
    "URL",
    "Category",
    "Subcategory",
    "Title",
    "Description",
    "Video ID",
];

/// Overwrite `path` with the `Success Count,Failure Count` report.
pub fn write_report(path: impl AsRef<Path>, report: &Report) -> PipelineResult<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    writer.serialize(report)?;
    writer.flush()?;

    info!(
        path = %path.display(),
        success = report.success_count,
        failure = report.failure_count,
        "Upload report saved"
    );
    Ok(())
}

/// Overwrite `path` with one row per extracted record.
///
/// The header is written even when there are no records.
pub fn write_extracted(path: impl AsRef<Path>, records: &[ExtractedRecord]) -> PipelineResult<()> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(EXTRACTED_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(path = %path.display(), records = records.len(), "Extracted records saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_report_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("upload_report.csv");
        std::fs::write(&path, "stale contents\n1,2,3\n").unwrap();

        write_report(
            &path,
            &Report {
                success_count: 3,
                failure_count: 2,
            },
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Success Count,Failure Count\n3,2\n"
        );
    }

    #[test]
    fn test_write_extracted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("extracted.csv");
        let records = vec![ExtractedRecord {
            url: "https://youtu.be/abc123".to_string(),
            category: "Comedy".to_string(),
            subcategory: "Shorts".to_string(),
            title: "Funny cat".to_string(),
            description: "A cat. With commas, too".to_string(),
            video_id: "abc123".to_string(),
        }];

        write_extracted(&path, &records).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "URL,Category,Subcategory,Title,Description,Video ID\n\
             https://youtu.be/abc123,Comedy,Shorts,Funny cat,\"A cat. With commas, too\",abc123\n"
        );
    }

    #[test]
    fn test_write_extracted_empty_has_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("extracted.csv");
        write_extracted(&path, &[]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "URL,Category,Subcategory,Title,Description,Video ID\n"
        );
    }
}
