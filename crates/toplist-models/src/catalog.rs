use serde::{Deserialize, Serialize};

use crate::media::MediaType;

/// Resolved catalog identity for a movie or show on the tracking service.
/// Built transiently during the add phase (from search results) or parsed
/// out of a list snapshot, and discarded after the batch calls are issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItem {
    pub media_type: MediaType,
    pub trakt_id: u64,
    pub title: String,
}
