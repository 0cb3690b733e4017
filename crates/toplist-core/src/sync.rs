use reqwest::Client;
use toplist_config::{Config, TokenStore};
use toplist_models::StreamingService;
use toplist_sources::{create_http_client, flixpatrol, TraktClient};
use tracing::info;

use crate::error::RunError;
use crate::reconcile::{ListReconciler, ReconcileSummary};

#[derive(Debug, Default)]
pub struct RunSummary {
    pub services: Vec<(StreamingService, ReconcileSummary)>,
}

impl RunSummary {
    pub fn total_added(&self) -> usize {
        self.services.iter().map(|(_, s)| s.added).sum()
    }

    pub fn total_removed(&self) -> usize {
        self.services.iter().map(|(_, s)| s.removed).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.services.iter().map(|(_, s)| s.skipped).sum()
    }
}

/// Drives a full run: authenticate once, then scrape and reconcile each
/// configured service in order. Everything is sequential; a fatal error
/// anywhere skips all remaining services.
pub struct SyncOrchestrator {
    config: Config,
    store: TokenStore,
    client: TraktClient,
    http: Client,
}

impl SyncOrchestrator {
    pub fn new(config: Config, store: TokenStore) -> Self {
        let client = TraktClient::new(&config.trakt);
        Self {
            config,
            store,
            client,
            http: create_http_client(),
        }
    }

    /// Acquire a token without running a sync. With `force` the device
    /// flow runs even when a persisted token would validate.
    pub async fn authenticate(&mut self, force: bool) -> Result<(), RunError> {
        let result = if force {
            self.client.reauthenticate(&self.store).await
        } else {
            self.client.authenticate(&self.store).await
        };
        result.map_err(RunError::TokenAcquisition)
    }

    pub async fn run(&mut self, services: &[StreamingService]) -> Result<RunSummary, RunError> {
        // Token first; no point processing any service without credentials.
        if !self.client.is_authenticated() {
            self.authenticate(false).await?;
        }

        let mut summary = RunSummary::default();
        for &service in services {
            info!("Processing top 10 list for {}", service);

            let scraped = flixpatrol::fetch_top10(&self.http, &self.config.source.base_url, service)
                .await
                .map_err(|source| RunError::Scrape { service, source })?;

            let reconciler = ListReconciler::new(&self.client);
            let outcome = reconciler.reconcile(service, &scraped).await?;
            info!(
                "{}: {} added, {} removed, {} skipped",
                service, outcome.added, outcome.removed, outcome.skipped
            );
            summary.services.push((service, outcome));
        }

        Ok(summary)
    }
}
