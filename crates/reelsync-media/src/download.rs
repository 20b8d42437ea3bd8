//! Video download using yt-dlp.
//!
//! A download is three yt-dlp steps followed by local bookkeeping:
//! resolve the URL to its metadata and format list, pick the best format
//! that carries both audio and video, fetch it into the output folder, then
//! rename it in place to `{video_id}_{timestamp}.mp4` and write a metadata
//! sidecar next to it.

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use async_trait::async_trait;
use chrono::Local;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info, warn};

use reelsync_models::utils::VIDEO_EXTENSION;
use reelsync_models::{
    asset_filename, clean_text, filename_timestamp, metadata_filename, VideoAsset,
};

use crate::config::MediaConfig;
use crate::error::{MediaError, MediaResult};

/// Metadata yt-dlp reports for a single video.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    /// Platform video identifier
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub formats: Vec<FormatInfo>,
}

/// One downloadable format of a video.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatInfo {
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    /// Total bitrate in kbit/s
    #[serde(default)]
    pub tbr: Option<f64>,
}

impl FormatInfo {
    pub fn has_video(&self) -> bool {
        codec_present(self.vcodec.as_deref())
    }

    pub fn has_audio(&self) -> bool {
        codec_present(self.acodec.as_deref())
    }

    /// Audio and video muxed into a single stream.
    pub fn is_progressive(&self) -> bool {
        self.has_video() && self.has_audio()
    }

    pub fn is_mp4(&self) -> bool {
        self.ext.as_deref() == Some(VIDEO_EXTENSION)
    }
}

fn codec_present(codec: Option<&str>) -> bool {
    matches!(codec, Some(c) if !c.is_empty() && c != "none")
}

/// Pick the highest-resolution progressive format.
///
/// Ties on height go to an mp4 container first, then to the higher total
/// bitrate. Downloads are always saved with an `.mp4` name.
pub fn select_stream(formats: &[FormatInfo]) -> Option<&FormatInfo> {
    formats
        .iter()
        .filter(|f| f.is_progressive())
        .max_by(|a, b| {
            a.height
                .cmp(&b.height)
                .then_with(|| a.is_mp4().cmp(&b.is_mp4()))
                .then_with(|| a.tbr.partial_cmp(&b.tbr).unwrap_or(std::cmp::Ordering::Equal))
        })
}

/// Anything that can turn a watch URL into [`VideoInfo`].
#[async_trait]
pub trait VideoResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> MediaResult<VideoInfo>;
}

/// yt-dlp command-line driver.
#[derive(Debug, Clone)]
pub struct YtDlp {
    config: MediaConfig,
}

impl YtDlp {
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::new(MediaConfig::from_env())
    }

    fn base_command(&self) -> MediaResult<Command> {
        let bin = which::which(&self.config.ytdlp_bin)
            .map_err(|_| MediaError::YtDlpNotFound(self.config.ytdlp_bin.clone()))?;

        let mut cmd = Command::new(bin);
        cmd.args(["--no-playlist", "--no-warnings"]);
        if let Some(cookies) = &self.config.cookies_file {
            cmd.arg("--cookies").arg(cookies);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        Ok(cmd)
    }

    /// Resolve a URL to its metadata without downloading anything.
    pub async fn fetch_info(&self, url: &str) -> MediaResult<VideoInfo> {
        let mut cmd = self.base_command()?;
        cmd.args(["--dump-single-json", "--skip-download"]).arg(url);

        debug!(url = %url, "Resolving video metadata");
        let output = cmd
            .output()
            .await
            .map_err(|e| MediaError::resolve_failed(url, e.to_string()))?;

        if !output.status.success() {
            return Err(MediaError::resolve_failed(url, last_stderr_line(&output)));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| MediaError::resolve_failed(url, format!("unreadable metadata: {}", e)))
    }

    /// Download one format into `output_dir` under yt-dlp's default file name.
    ///
    /// Returns the path yt-dlp reports after moving the finished file.
    pub async fn fetch_format(
        &self,
        url: &str,
        format_id: &str,
        output_dir: impl AsRef<Path>,
    ) -> MediaResult<PathBuf> {
        let output_dir = output_dir.as_ref();
        let mut cmd = self.base_command()?;
        cmd.arg("-f")
            .arg(format_id)
            .arg("-P")
            .arg(output_dir)
            .args(["--no-simulate", "--print", "after_move:filepath"])
            .arg(url);

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("yt-dlp stderr: {}", stderr);
            return Err(MediaError::download_failed(format!(
                "yt-dlp failed: {}",
                last_stderr_line(&output)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .last()
            .map(PathBuf::from)
            .ok_or_else(|| MediaError::download_failed("yt-dlp did not report an output file"))?;

        if !path.exists() {
            return Err(MediaError::download_failed(format!(
                "Output file not created: {}",
                path.display()
            )));
        }

        Ok(path)
    }

    /// Download `url` into `output_dir` and describe the result.
    ///
    /// No rollback: a file that was fetched but could not be renamed stays
    /// where yt-dlp left it.
    pub async fn download(&self, url: &str, output_dir: impl AsRef<Path>) -> MediaResult<VideoAsset> {
        let output_dir = output_dir.as_ref();
        let info = self.fetch_info(url).await?;

        let format = match select_stream(&info.formats) {
            Some(f) => f,
            None => {
                warn!(url = %url, formats = info.formats.len(), "No suitable streams found for the video");
                return Err(MediaError::NoSuitableStream(url.to_string()));
            }
        };

        info!(
            url = %url,
            video_id = %info.id,
            format_id = %format.format_id,
            height = format.height.unwrap_or(0),
            "Downloading video"
        );

        let downloaded = self.fetch_format(url, &format.format_id, output_dir).await?;

        let title = clean_text(&info.title);
        let description = clean_text(info.description.as_deref().unwrap_or_default());

        let timestamp = filename_timestamp(&Local::now());
        let filename = asset_filename(&info.id, &timestamp);
        let filepath = output_dir.join(&filename);
        tokio::fs::rename(&downloaded, &filepath).await?;

        write_metadata_sidecar(output_dir, &info.id, &title, &description).await?;

        let size = tokio::fs::metadata(&filepath).await.map(|m| m.len()).unwrap_or(0);
        info!(
            output = %filepath.display(),
            size_mb = size as f64 / (1024.0 * 1024.0),
            "Video downloaded successfully"
        );

        Ok(VideoAsset {
            title,
            description,
            video_id: info.id,
            filename,
            filepath,
        })
    }
}

#[async_trait]
impl VideoResolver for YtDlp {
    async fn resolve(&self, url: &str) -> MediaResult<VideoInfo> {
        self.fetch_info(url).await
    }
}

/// Write `{video_id}_metadata.txt` into `dir`.
pub async fn write_metadata_sidecar(
    dir: impl AsRef<Path>,
    video_id: &str,
    title: &str,
    description: &str,
) -> MediaResult<PathBuf> {
    let path = dir.as_ref().join(metadata_filename(video_id));
    let body = format!(
        "Title: {}\nDescription: {}\nVideo ID: {}\n",
        title, description, video_id
    );
    tokio::fs::write(&path, body).await?;
    Ok(path)
}

fn last_stderr_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .unwrap_or("Unknown error")
        .to_string()
}
