//! Single-frame decode check via FFprobe.
//!
//! A file is playable when FFprobe can open it and decode at least one frame
//! of its first video stream. Only the first packet interval is read, so the
//! check costs about the same for a short and a long video.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::MediaConfig;
use crate::error::{MediaError, MediaResult};

/// What the decoder found in the first frame interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCheck {
    /// Frames decoded from the first packet interval
    pub frames_decoded: u64,
    /// Codec of the first video stream
    pub codec: Option<String>,
}

impl FrameCheck {
    pub fn is_playable(&self) -> bool {
        self.frames_decoded > 0
    }
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_name: Option<String>,
    nb_read_frames: Option<String>,
}

/// Decodes the first frame of a video file with FFprobe.
#[derive(Debug, Clone)]
pub struct PlayabilityChecker {
    ffprobe_bin: String,
}

impl Default for PlayabilityChecker {
    fn default() -> Self {
        Self::new(&MediaConfig::default())
    }
}

impl PlayabilityChecker {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            ffprobe_bin: config.ffprobe_bin.clone(),
        }
    }

    /// Decode the first frame of `path`.
    ///
    /// The FFprobe process is the decoder handle: it is spawned with
    /// kill-on-drop, so it is reaped on completion and killed if this
    /// future is dropped early.
    pub async fn check(&self, path: impl AsRef<Path>) -> MediaResult<FrameCheck> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }

        let bin: PathBuf = which::which(&self.ffprobe_bin)
            .map_err(|_| MediaError::FfprobeNotFound(self.ffprobe_bin.clone()))?;

        let output = Command::new(bin)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-count_frames",
                "-read_intervals",
                "%+#1",
                "-show_entries",
                "stream=codec_name,nb_read_frames",
                "-of",
                "json",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            return Err(MediaError::FfprobeFailed {
                message: format!("FFprobe could not open {}", path.display()),
                stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
            });
        }

        parse_frame_check(&output.stdout)
    }

    /// `true` only when the file opens and a frame decodes.
    ///
    /// Every failure is logged and reported as `false`.
    pub async fn is_playable(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.check(path).await {
            Ok(check) if check.is_playable() => {
                debug!(path = %path.display(), codec = ?check.codec, "Video is playable");
                true
            }
            Ok(_) => {
                warn!(path = %path.display(), "No frame could be decoded");
                false
            }
            Err(e) => {
                warn!(path = %path.display(), "Error checking video playability: {}", e);
                false
            }
        }
    }
}

/// Parse FFprobe's JSON into a [`FrameCheck`].
fn parse_frame_check(stdout: &[u8]) -> MediaResult<FrameCheck> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)?;

    let stream = probe
        .streams
        .into_iter()
        .next()
        .ok_or_else(|| MediaError::invalid_video("No video stream found"))?;

    let frames_decoded = stream
        .nb_read_frames
        .as_deref()
        .and_then(|n| n.trim().parse::<u64>().ok())
        .unwrap_or(0);

    Ok(FrameCheck {
        frames_decoded,
        codec: stream.codec_name,
    })
}
