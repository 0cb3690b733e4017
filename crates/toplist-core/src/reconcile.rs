use toplist_models::{CatalogItem, ListSnapshot, MediaType, ScrapedTitles, StreamingService};
use toplist_sources::{TraktClient, TraktError};
use tracing::{debug, error, info};

use crate::diff::ListDiff;
use crate::error::RunError;
use crate::matching;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub added: usize,
    pub removed: usize,
    /// Titles in the add set that no search candidate matched, or whose
    /// search call failed. Silently skipped by design.
    pub skipped: usize,
}

fn kind(item: &CatalogItem) -> &'static str {
    match item.media_type {
        MediaType::Movie => "movie",
        MediaType::Show => "show",
    }
}

/// Reconciles one service's remote list against a fresh scrape. Only the
/// initial fetch/create step can fail the run; add/remove batch failures
/// leave that direction incomplete for this cycle and are logged.
pub struct ListReconciler<'a> {
    client: &'a TraktClient,
}

impl<'a> ListReconciler<'a> {
    pub fn new(client: &'a TraktClient) -> Self {
        Self { client }
    }

    pub async fn reconcile(
        &self,
        service: StreamingService,
        scraped: &ScrapedTitles,
    ) -> Result<ReconcileSummary, RunError> {
        let list_name = service.list_name();

        let snapshot = match self.client.list_items(&list_name).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                info!("List {} not found, creating it", list_name);
                self.client
                    .create_list(service)
                    .await
                    .map_err(|source| list_setup_error(service, source))?;
                info!("List created.");
                ListSnapshot::default()
            }
            Err(source) => return Err(list_setup_error(service, source)),
        };

        let existing = snapshot.titles();
        let diff = ListDiff::compute(&scraped.combined(), &existing);
        debug!(
            "{}: {} existing, {} to add, {} to remove",
            list_name,
            existing.len(),
            diff.to_add.len(),
            diff.to_remove.len()
        );

        let (resolved, skipped) = self.resolve_additions(&diff.to_add).await?;

        let mut added = 0;
        if !resolved.is_empty() {
            match self.client.add_items(&list_name, &resolved).await {
                Ok(()) => {
                    for item in &resolved {
                        info!("➕ Added {}: {}", kind(item), item.title);
                    }
                    info!("➕ Total items added: {}", resolved.len());
                    added = resolved.len();
                }
                Err(err) if err.is_rate_limit_exhausted() => {
                    return Err(RunError::RateLimitExhausted(err))
                }
                Err(err) => {
                    error!("Error adding items to {} list: {}", service, err);
                }
            }
        }

        let deletions = snapshot.items_with_titles(&diff.to_remove);
        let mut removed = 0;
        if !deletions.is_empty() {
            match self.client.remove_items(&list_name, &deletions).await {
                Ok(()) => {
                    for item in &deletions {
                        info!("❌ Deleted {}: {}", kind(item), item.title);
                    }
                    info!("❌ Total items deleted: {}", deletions.len());
                    removed = deletions.len();
                }
                Err(err) if err.is_rate_limit_exhausted() => {
                    return Err(RunError::RateLimitExhausted(err))
                }
                Err(err) => {
                    error!("Error removing items from the {} list: {}", service, err);
                }
            }
        }

        Ok(ReconcileSummary {
            added,
            removed,
            skipped,
        })
    }

    /// Resolve titles to catalog identities via search plus fuzzy match.
    /// Unmatched titles are skipped without error; a failed search call is
    /// soft too, unless the rate limiter gave up.
    async fn resolve_additions(
        &self,
        titles: &[String],
    ) -> Result<(Vec<CatalogItem>, usize), RunError> {
        let mut resolved = Vec::new();
        let mut skipped = 0;

        for title in titles {
            let query = title.trim();
            debug!("Searching for title: {}", query);
            match self.client.search(query).await {
                Ok(candidates) => match matching::first_match(query, &candidates) {
                    Some(item) => {
                        debug!("Match found for {}: {} ({})", kind(item), item.title, item.trakt_id);
                        resolved.push(item.clone());
                    }
                    None => {
                        debug!("No catalog match for \"{}\", skipping", query);
                        skipped += 1;
                    }
                },
                Err(err) if err.is_rate_limit_exhausted() => {
                    return Err(RunError::RateLimitExhausted(err))
                }
                Err(err) => {
                    error!("Search failed for \"{}\": {}", query, err);
                    skipped += 1;
                }
            }
        }

        Ok((resolved, skipped))
    }
}

fn list_setup_error(service: StreamingService, source: TraktError) -> RunError {
    if source.is_rate_limit_exhausted() {
        RunError::RateLimitExhausted(source)
    } else {
        RunError::ListSetup { service, source }
    }
}
