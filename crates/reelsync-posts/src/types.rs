//! Content API request types.

use serde::{Deserialize, Serialize};

/// Body of a create-post request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "subCategory1")]
    pub sub_category: String,
    /// Uploaded file name
    pub source: String,
    pub views: u64,
}
