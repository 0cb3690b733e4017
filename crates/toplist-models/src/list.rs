use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

/// Current contents of a remote list, fetched fresh each run and never
/// cached across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSnapshot {
    pub items: Vec<CatalogItem>,
}

impl ListSnapshot {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Exact titles currently on the list. Case-sensitive, no
    /// normalization; comparison against scraped titles is a plain string
    /// match.
    pub fn titles(&self) -> HashSet<String> {
        self.items.iter().map(|item| item.title.clone()).collect()
    }

    /// Items whose title appears in `titles`, in snapshot order. Used to
    /// resolve deletions back to catalog ids.
    pub fn items_with_titles(&self, titles: &HashSet<String>) -> Vec<CatalogItem> {
        self.items
            .iter()
            .filter(|item| titles.contains(&item.title))
            .cloned()
            .collect()
    }
}
