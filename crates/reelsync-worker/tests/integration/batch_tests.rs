//! End-to-end batch runs against mocked storage and content API.
//!
//! yt-dlp and FFprobe are replaced by in-process fakes; the storage and
//! posts clients are the real ones pointed at wiremock servers.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reelsync_media::{MediaError, MediaResult, VideoInfo, VideoResolver};
use reelsync_models::{asset_filename, VideoAsset};
use reelsync_posts::{PostPublisher, PostsClient, PostsConfig};
use reelsync_storage::{StorageClient, StorageConfig};
use reelsync_worker::{
    write_extracted, write_report, BatchRunner, Pipeline, PlayabilityProbe, Stage,
    VideoDownloader,
};

const TIMESTAMP: &str = "20240101120000";

/// Writes a small file for `https://youtu.be/<id>` URLs, rejects anything else.
struct FakeDownloader;

#[async_trait]
impl VideoDownloader for FakeDownloader {
    async fn download(&self, url: &str, output_dir: &Path) -> MediaResult<VideoAsset> {
        let id = url
            .strip_prefix("https://youtu.be/")
            .ok_or_else(|| MediaError::resolve_failed(url, "is not a valid URL"))?;

        let filename = asset_filename(id, TIMESTAMP);
        let filepath = output_dir.join(&filename);
        tokio::fs::write(&filepath, format!("video {}", id)).await?;

        Ok(VideoAsset {
            title: format!("Title {}", id),
            description: format!("Description {}", id),
            video_id: id.to_string(),
            filename,
            filepath,
        })
    }
}

/// Any file whose name starts with `broken` fails to decode.
struct FakeProbe;

#[async_trait]
impl PlayabilityProbe for FakeProbe {
    async fn is_playable(&self, path: &Path) -> bool {
        !path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("broken"))
    }
}

struct FakeResolver {
    views: u64,
}

#[async_trait]
impl VideoResolver for FakeResolver {
    async fn resolve(&self, url: &str) -> MediaResult<VideoInfo> {
        let id = url.rsplit("v=").next().unwrap_or_default().to_string();
        Ok(VideoInfo {
            id,
            title: String::new(),
            description: None,
            view_count: Some(self.views),
            formats: Vec::new(),
        })
    }
}

fn runner(root: &Path, storage: &MockServer, posts: &MockServer) -> BatchRunner {
    let storage = StorageClient::new(StorageConfig::new(
        format!("{}/kaptivate/prod/", storage.uri()),
        "test-key",
    ))
    .unwrap();
    let posts = PostsClient::new(PostsConfig {
        endpoint: format!("{}/prod/create-post/", posts.uri()),
        timeout: None,
    })
    .unwrap();
    let publisher = PostPublisher::new(posts, FakeResolver { views: 42 });

    let pipeline = Pipeline::new(
        Arc::new(FakeDownloader),
        Arc::new(FakeProbe),
        Arc::new(storage),
        Arc::new(publisher),
        root,
    );
    BatchRunner::new(pipeline, 1)
}

#[tokio::test]
async fn test_mixed_batch() {
    let root = TempDir::new().unwrap();
    let storage = MockServer::start().await;
    let posts = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/kaptivate/prod/abc123_20240101120000.mp4"))
        .and(header("AccessKey", "test-key"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&storage)
        .await;
    Mock::given(method("POST"))
        .and(path("/prod/create-post/"))
        .and(body_partial_json(serde_json::json!({
            "title": "Title abc123",
            "description": "Description abc123",
            "category": "Comedy",
            "subCategory1": "Shorts",
            "source": "abc123_20240101120000.mp4",
            "views": 42
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&posts)
        .await;

    let input = "\
https://youtu.be/abc123,Comedy,Shorts
not-a-url,News,Daily

https://youtu.be/broken1,Music,Live
";
    let summary = runner(root.path(), &storage, &posts).run(input).await;

    assert_eq!(summary.report.success_count, 1);
    assert_eq!(summary.report.failure_count, 2);

    // Successful record lands under its category folders
    let video = root.path().join("Comedy/Shorts/abc123_20240101120000.mp4");
    assert!(video.is_file());

    // Failed download still created its folder, but nothing in it
    let news = root.path().join("News/Daily");
    assert!(news.is_dir());
    assert_eq!(std::fs::read_dir(&news).unwrap().count(), 0);

    let stages: Vec<Stage> = summary
        .failures()
        .map(|r| r.outcome.as_ref().unwrap_err().stage())
        .collect();
    assert_eq!(stages, vec![Stage::Download, Stage::Playability]);

    // The unplayable record still downloaded, so it is extracted
    let ids: Vec<&str> = summary
        .extracted
        .iter()
        .map(|e| e.video_id.as_str())
        .collect();
    assert_eq!(ids, vec!["abc123", "broken1"]);

    let report_path = root.path().join("upload_report.csv");
    write_report(&report_path, &summary.report).unwrap();
    assert_eq!(
        std::fs::read_to_string(&report_path).unwrap(),
        "Success Count,Failure Count\n1,2\n"
    );

    let extracted_path = root.path().join("extracted.csv");
    write_extracted(&extracted_path, &summary.extracted).unwrap();
    let extracted = std::fs::read_to_string(&extracted_path).unwrap();
    assert!(extracted.starts_with("URL,Category,Subcategory,Title,Description,Video ID\n"));
    assert!(extracted.contains("https://youtu.be/broken1,Music,Live,Title broken1,Description broken1,broken1"));
}

#[tokio::test]
async fn test_storage_rejection_skips_post() {
    let root = TempDir::new().unwrap();
    let storage = MockServer::start().await;
    let posts = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&storage)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&posts)
        .await;

    let summary = runner(root.path(), &storage, &posts)
        .run("https://youtu.be/abc123,Comedy,Shorts\n")
        .await;

    assert_eq!(summary.report.success_count, 0);
    assert_eq!(summary.report.failure_count, 1);
    assert_eq!(
        summary.records[0].outcome.as_ref().unwrap_err().stage(),
        Stage::Upload
    );
}

#[tokio::test]
async fn test_post_rejection_is_failure() {
    let root = TempDir::new().unwrap();
    let storage = MockServer::start().await;
    let posts = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&storage)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&posts)
        .await;

    let summary = runner(root.path(), &storage, &posts)
        .run("https://youtu.be/abc123,Comedy,Shorts\n")
        .await;

    assert_eq!(summary.report.failure_count, 1);
    assert_eq!(
        summary.records[0].outcome.as_ref().unwrap_err().stage(),
        Stage::Publish
    );
}

#[tokio::test]
async fn test_empty_input_reports_zeros() {
    let root = TempDir::new().unwrap();
    let storage = MockServer::start().await;
    let posts = MockServer::start().await;

    let input_path = root.path().join("input.txt");
    tokio::fs::write(&input_path, "\n   \n").await.unwrap();

    let summary = runner(root.path(), &storage, &posts)
        .run_file(&input_path)
        .await
        .unwrap();

    assert_eq!(summary.report.total(), 0);
    let report_path = root.path().join("report.csv");
    write_report(&report_path, &summary.report).unwrap();
    assert_eq!(
        std::fs::read_to_string(&report_path).unwrap(),
        "Success Count,Failure Count\n0,0\n"
    );
}
