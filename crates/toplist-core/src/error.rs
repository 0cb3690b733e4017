use toplist_models::StreamingService;
use toplist_sources::TraktError;

/// Run-fatal failures. Everything here terminates the run: soft
/// conditions (unmatched search results, failed add/remove batches) are
/// logged inside the reconciler and never surface as a `RunError`.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// No valid token and the device flow failed. Nothing can be
    /// processed without credentials.
    #[error("Unable to get Trakt authorization")]
    TokenAcquisition(#[source] anyhow::Error),

    /// Ranking page fetch or parse failure. Not caught; ends the run.
    #[error("Failed to scrape the ranking page for {service}")]
    Scrape {
        service: StreamingService,
        #[source]
        source: anyhow::Error,
    },

    /// The list could neither be fetched nor created.
    #[error("Unable to fetch or create the {service} list")]
    ListSetup {
        service: StreamingService,
        #[source]
        source: TraktError,
    },

    /// Bounded 429 backoff ran out of attempts on some call.
    #[error(transparent)]
    RateLimitExhausted(TraktError),
}
