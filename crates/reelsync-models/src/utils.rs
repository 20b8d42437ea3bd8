//! File naming and URL helpers shared by the downloader and the publisher.

use chrono::{DateTime, TimeZone};
use url::Url;

/// Extension given to every downloaded video.
pub const VIDEO_EXTENSION: &str = "mp4";

/// `strftime` layout of the timestamp embedded in file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const TIMESTAMP_LEN: usize = 14;

/// Watch page used to look a video up by its identifier.
const WATCH_URL_BASE: &str = "https://www.youtube.com/watch";

/// Format a timestamp to second precision, e.g. `20240131235959`.
pub fn filename_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// `{video_id}_{timestamp}.mp4`
pub fn asset_filename(video_id: &str, timestamp: &str) -> String {
    format!("{}_{}.{}", video_id, timestamp, VIDEO_EXTENSION)
}

/// `{video_id}_metadata.txt`
pub fn metadata_filename(video_id: &str) -> String {
    format!("{}_metadata.txt", video_id)
}

/// Recover the platform video id from an asset file name.
///
/// Drops the trailing 4-character extension (`.mp4`) and then the
/// `_{timestamp}` suffix added by [`asset_filename`] when present.
pub fn video_id_from_filename(filename: &str) -> Option<String> {
    let cut = filename.len().checked_sub(4)?;
    if !filename.is_char_boundary(cut) {
        return None;
    }
    let stem = &filename[..cut];

    let id = match stem.rsplit_once('_') {
        Some((id, suffix))
            if suffix.len() == TIMESTAMP_LEN && suffix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            id
        }
        _ => stem,
    };

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Watch URL for a video id, with the id query-encoded.
pub fn watch_url(video_id: &str) -> String {
    match Url::parse_with_params(WATCH_URL_BASE, &[("v", video_id)]) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}?v={}", WATCH_URL_BASE, video_id),
    }
}
