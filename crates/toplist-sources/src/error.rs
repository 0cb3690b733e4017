use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum TraktError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Five consecutive 429s on one call. Always fatal for the whole run.
    #[error("Exceeded maximum retries due to rate limiting ({attempts} attempts on {url})")]
    RateLimitExhausted { url: String, attempts: u32 },

    #[error("Unexpected response from {url}: {status} - {body}")]
    UnexpectedStatus {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Not authenticated: no access token available")]
    NotAuthenticated,
}

impl TraktError {
    /// Whether this error must terminate the entire run rather than just
    /// the current operation.
    pub fn is_rate_limit_exhausted(&self) -> bool {
        matches!(self, TraktError::RateLimitExhausted { .. })
    }
}
