use serde::{Deserialize, Serialize};

/// Titles extracted from one ranking page, split by page section.
/// Ordering within each category follows the page; no rank numbers or
/// other metadata are retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapedTitles {
    pub movies: Vec<String>,
    pub shows: Vec<String>,
}

impl ScrapedTitles {
    /// Movies followed by shows, the order the reconciler consumes.
    pub fn combined(&self) -> Vec<String> {
        self.movies.iter().chain(self.shows.iter()).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.shows.is_empty()
    }
}
