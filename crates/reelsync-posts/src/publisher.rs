//! Post publishing: views re-lookup followed by create-post.

use tracing::{debug, warn};

use reelsync_media::VideoResolver;
use reelsync_models::{video_id_from_filename, watch_url};

use crate::client::PostsClient;
use crate::error::{PostError, PostResult};
use crate::types::PostPayload;

/// Registers uploaded videos with the content API.
///
/// View counts are fetched fresh for every post, independent of whatever
/// the download step saw.
pub struct PostPublisher<R> {
    client: PostsClient,
    resolver: R,
}

impl<R: VideoResolver> PostPublisher<R> {
    pub fn new(client: PostsClient, resolver: R) -> Self {
        Self { client, resolver }
    }

    /// Current view count for the video an asset file was made from.
    pub async fn views_for(&self, filename: &str) -> PostResult<u64> {
        let video_id = video_id_from_filename(filename)
            .ok_or_else(|| PostError::InvalidSource(filename.to_string()))?;
        let url = watch_url(&video_id);
        debug!(url = %url, "Looking up view count");

        let info = self
            .resolver
            .resolve(&url)
            .await
            .map_err(|e| PostError::views_lookup(e.to_string()))?;

        info.view_count
            .ok_or_else(|| PostError::views_lookup(format!("no view count reported for {}", video_id)))
    }

    /// Look up views, then POST the record. No POST is sent if the lookup fails.
    pub async fn publish(
        &self,
        title: &str,
        description: &str,
        category: &str,
        subcategory: &str,
        filename: &str,
    ) -> PostResult<()> {
        let views = match self.views_for(filename).await {
            Ok(views) => views,
            Err(e) => {
                warn!("Error registering video {}: {}", filename, e);
                return Err(e);
            }
        };

        let payload = PostPayload {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            sub_category: subcategory.to_string(),
            source: filename.to_string(),
            views,
        };

        self.client.create_post(&payload).await
    }
}
