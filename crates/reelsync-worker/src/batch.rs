//! Batch orchestration over an input file.

use std::path::Path;

use futures::stream::{self, StreamExt};
use tracing::{info, warn, Instrument};

use reelsync_models::{parse_line, ExtractedRecord, InputRecord, LineParseError, Report, VideoAsset};

use crate::error::{PipelineError, PipelineResult};
use crate::logging::RecordLogger;
use crate::pipeline::Pipeline;

/// Outcome of one non-blank input line.
#[derive(Debug)]
pub struct RecordSummary {
    /// 1-based line number in the input
    pub line: usize,
    /// Raw line for malformed input, URL otherwise
    pub source: String,
    pub outcome: Result<VideoAsset, PipelineError>,
}

/// Everything a run produced, in input order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub report: Report,
    pub extracted: Vec<ExtractedRecord>,
    pub records: Vec<RecordSummary>,
}

impl BatchSummary {
    pub fn failures(&self) -> impl Iterator<Item = &RecordSummary> {
        self.records.iter().filter(|r| r.outcome.is_err())
    }

    fn push(&mut self, summary: RecordSummary, extracted: Option<ExtractedRecord>) {
        match &summary.outcome {
            Ok(_) => self.report.record_success(),
            Err(_) => self.report.record_failure(),
        }
        self.extracted.extend(extracted);
        self.records.push(summary);
    }
}

/// Drives every line of a batch file through the [`Pipeline`].
pub struct BatchRunner {
    pipeline: Pipeline,
    max_parallel: usize,
}

impl BatchRunner {
    /// `max_parallel` of 1 (or 0) processes records strictly one at a time.
    pub fn new(pipeline: Pipeline, max_parallel: usize) -> Self {
        Self {
            pipeline,
            max_parallel: max_parallel.max(1),
        }
    }

    /// Read `path` and run every line.
    pub async fn run_file(&self, path: impl AsRef<Path>) -> PipelineResult<BatchSummary> {
        let path = path.as_ref();
        let input = tokio::fs::read_to_string(path).await.map_err(|e| {
            PipelineError::config(format!("cannot read input file {}: {}", path.display(), e))
        })?;
        Ok(self.run(&input).await)
    }

    /// Run every non-blank line of `input`.
    ///
    /// Blank lines are ignored; every other line ends up as exactly one
    /// success or one failure in the report.
    pub async fn run(&self, input: &str) -> BatchSummary {
        let lines: Vec<(usize, Result<InputRecord, LineParseError>)> = input
            .lines()
            .enumerate()
            .filter_map(|(idx, raw)| match parse_line(raw) {
                Ok(None) => None,
                Ok(Some(record)) => Some((idx + 1, Ok(record))),
                Err(e) => Some((idx + 1, Err(e))),
            })
            .collect();

        info!(
            records = lines.len(),
            max_parallel = self.max_parallel,
            "Starting batch"
        );

        let results: Vec<(RecordSummary, Option<ExtractedRecord>)> = stream::iter(lines)
            .map(|(line, parsed)| self.run_line(line, parsed))
            .buffered(self.max_parallel)
            .collect()
            .await;

        let mut summary = BatchSummary::default();
        for (record, extracted) in results {
            summary.push(record, extracted);
        }

        info!(
            success = summary.report.success_count,
            failure = summary.report.failure_count,
            extracted = summary.extracted.len(),
            "Batch finished"
        );
        summary
    }

    async fn run_line(
        &self,
        line: usize,
        parsed: Result<InputRecord, LineParseError>,
    ) -> (RecordSummary, Option<ExtractedRecord>) {
        let record = match parsed {
            Ok(record) => record,
            Err(e) => {
                let source = e.line().to_string();
                let error = PipelineError::from(e);
                warn!(line, "{}", error);
                return (
                    RecordSummary {
                        line,
                        source,
                        outcome: Err(error),
                    },
                    None,
                );
            }
        };

        let logger = RecordLogger::new(line, &record.url);
        let span = logger.create_span();

        async move {
            logger.log_start(&record.to_string());
            let result = self.pipeline.process(&record, &logger).await;

            match &result.outcome {
                Ok(asset) => logger.log_completion(&asset.filename),
                Err(e) => logger.log_error(&e.to_string()),
            }

            (
                RecordSummary {
                    line,
                    source: record.url.clone(),
                    outcome: result.outcome,
                },
                result.extracted,
            )
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tempfile::TempDir;

    use reelsync_media::MediaError;

    use crate::error::Stage;
    use crate::stages::{
        MockPlayabilityProbe, MockPostRegistrar, MockVideoDownloader, MockVideoUploader,
    };

    fn asset_for(url: &str, dir: &Path) -> VideoAsset {
        let id = url.rsplit('/').next().unwrap_or_default().to_string();
        let filename = format!("{}_20240101120000.mp4", id);
        VideoAsset {
            title: format!("Title {}", id),
            description: "desc".to_string(),
            filepath: dir.join(&filename),
            video_id: id,
            filename,
        }
    }

    /// Downloads succeed for youtu.be URLs and fail otherwise; everything else succeeds.
    fn runner(root: &Path, max_parallel: usize) -> BatchRunner {
        let mut downloader = MockVideoDownloader::new();
        downloader.expect_download().returning(|url, dir| {
            if url.starts_with("https://youtu.be/") {
                Ok(asset_for(url, dir))
            } else {
                Err(MediaError::resolve_failed(url, "is not a valid URL"))
            }
        });
        let mut probe = MockPlayabilityProbe::new();
        probe.expect_is_playable().return_const(true);
        let mut uploader = MockVideoUploader::new();
        uploader.expect_upload().returning(|_, _| Ok(()));
        let mut registrar = MockPostRegistrar::new();
        registrar.expect_register().returning(|_, _| Ok(()));

        let pipeline = Pipeline::new(
            Arc::new(downloader),
            Arc::new(probe),
            Arc::new(uploader),
            Arc::new(registrar),
            root,
        );
        BatchRunner::new(pipeline, max_parallel)
    }

    #[tokio::test]
    async fn test_malformed_lines_count_as_failures_without_download() {
        let root = TempDir::new().unwrap();
        let mut downloader = MockVideoDownloader::new();
        downloader.expect_download().never();
        let pipeline = Pipeline::new(
            Arc::new(downloader),
            Arc::new(MockPlayabilityProbe::new()),
            Arc::new(MockVideoUploader::new()),
            Arc::new(MockPostRegistrar::new()),
            root.path(),
        );
        let runner = BatchRunner::new(pipeline, 1);

        let input = "https://youtu.be/a,Comedy\nnot enough\nhttps://youtu.be/b,../escaped,Shorts\n";
        let summary = runner.run(input).await;

        assert_eq!(summary.report.success_count, 0);
        assert_eq!(summary.report.failure_count, 3);
        assert!(summary.extracted.is_empty());
        assert!(summary.records.iter().all(|r| r.outcome.as_ref().unwrap_err().stage() == Stage::Parse));
        assert_eq!(summary.records[1].source, "not enough");
        assert!(matches!(
            summary.records[2].outcome,
            Err(PipelineError::MalformedLine(LineParseError::UnsafeFolder { .. }))
        ));
        // No folders for malformed lines, inside or outside the root
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
        assert!(!root.path().join("../escaped").exists());
    }

    #[tokio::test]
    async fn test_counts_reconcile_with_non_blank_lines() {
        let root = TempDir::new().unwrap();
        let input = "\
https://youtu.be/aaa,Comedy,Shorts

not-a-url,Comedy,Shorts

https://youtu.be/bbb,Music,Live,ignored
broken line
";
        let summary = runner(root.path(), 1).run(input).await;

        let non_blank = input.lines().filter(|l| !l.trim().is_empty()).count() as u64;
        assert_eq!(summary.report.total(), non_blank);
        assert_eq!(summary.report.success_count, 2);
        assert_eq!(summary.report.failure_count, 2);

        let lines: Vec<usize> = summary.records.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 3, 5, 6]);

        let ids: Vec<&str> = summary.extracted.iter().map(|e| e.video_id.as_str()).collect();
        assert_eq!(ids, vec!["aaa", "bbb"]);
        assert_eq!(summary.failures().count(), 2);
    }

    #[tokio::test]
    async fn test_parallel_run_keeps_input_order() {
        let root = TempDir::new().unwrap();
        let input: String = (0..8)
            .map(|i| format!("https://youtu.be/v{},Cat,Sub\n", i))
            .collect();

        let summary = runner(root.path(), 4).run(&input).await;

        assert_eq!(summary.report.success_count, 8);
        let ids: Vec<String> = summary.extracted.iter().map(|e| e.video_id.clone()).collect();
        let expected: Vec<String> = (0..8).map(|i| format!("v{}", i)).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_run_file_missing_input() {
        let root = TempDir::new().unwrap();
        let err = runner(root.path(), 1)
            .run_file(root.path().join("missing.txt"))
            .await
            .unwrap_err();
        assert_eq!(err.stage(), Stage::Run);
    }
}
