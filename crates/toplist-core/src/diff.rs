// Diff computation between the scraped title set and a list snapshot.

use std::collections::HashSet;

/// Result of diffing the desired titles against the current list
/// contents. Comparison is exact and case-sensitive; scraped titles that
/// differ from catalog titles in punctuation or year suffixes will churn
/// as an add plus a delete, which is accepted behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDiff {
    /// Titles to resolve and add, in scraped order, deduplicated.
    pub to_add: Vec<String>,
    /// Titles currently on the list that the scrape no longer contains.
    pub to_remove: HashSet<String>,
}

impl ListDiff {
    pub fn compute(desired: &[String], existing: &HashSet<String>) -> Self {
        let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();

        let mut to_add = Vec::new();
        let mut seen = HashSet::new();
        for title in desired {
            if !existing.contains(title) && seen.insert(title.as_str()) {
                to_add.push(title.clone());
            }
        }

        let to_remove = existing
            .iter()
            .filter(|title| !desired_set.contains(title.as_str()))
            .cloned()
            .collect();

        Self { to_add, to_remove }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}
