//! External tool configuration.

use std::path::PathBuf;

/// Where to find yt-dlp and FFprobe, and how to call them.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// yt-dlp executable name or path
    pub ytdlp_bin: String,
    /// FFprobe executable name or path
    pub ffprobe_bin: String,
    /// Netscape cookies file handed to yt-dlp, if any
    pub cookies_file: Option<PathBuf>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ytdlp_bin: "yt-dlp".to_string(),
            ffprobe_bin: "ffprobe".to_string(),
            cookies_file: None,
        }
    }
}

impl MediaConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            ytdlp_bin: std::env::var("YTDLP_BIN").unwrap_or_else(|_| "yt-dlp".to_string()),
            ffprobe_bin: std::env::var("FFPROBE_BIN").unwrap_or_else(|_| "ffprobe".to_string()),
            cookies_file: std::env::var("YTDLP_COOKIES_FILE")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }
}
