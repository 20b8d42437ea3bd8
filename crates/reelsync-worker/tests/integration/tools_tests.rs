//! Checks against the real yt-dlp and FFprobe binaries.

use reelsync_media::{MediaConfig, PlayabilityChecker, VideoResolver, YtDlp};
use reelsync_worker::PlayabilityProbe;

/// A file that is not a video is never playable.
#[tokio::test]
#[ignore = "requires ffprobe"]
async fn test_garbage_file_is_unplayable() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("garbage_20240101120000.mp4");
    tokio::fs::write(&file, b"definitely not an mp4").await.unwrap();

    let checker = PlayabilityChecker::new(&MediaConfig::from_env());
    assert!(!PlayabilityProbe::is_playable(&checker, &file).await);
}

/// Resolve a long-lived public video and make sure views come back.
#[tokio::test]
#[ignore = "requires yt-dlp and network access"]
async fn test_resolve_public_video() {
    dotenvy::dotenv().ok();

    let ytdlp = YtDlp::from_env();
    let info = ytdlp
        .resolve("https://www.youtube.com/watch?v=jNQXAC9IVRw")
        .await
        .expect("Failed to resolve video");

    println!("Resolved {} with {:?} views", info.id, info.view_count);
    assert_eq!(info.id, "jNQXAC9IVRw");
    assert!(info.view_count.is_some());
    assert!(!info.formats.is_empty());
}
