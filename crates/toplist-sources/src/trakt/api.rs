use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tokio::time::sleep;
use toplist_models::{CatalogItem, ListSnapshot, MediaType, StreamingService};
use tracing::{debug, warn};

use crate::error::TraktError;

/// Total attempts per rate-limited call, including the first one.
const RATE_LIMIT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

#[derive(Debug, Deserialize)]
struct TraktIds {
    trakt: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TraktMedia {
    title: String,
    ids: TraktIds,
}

#[derive(Debug, Deserialize)]
struct TraktEntry {
    #[serde(rename = "type", default)]
    item_type: Option<String>,
    movie: Option<TraktMedia>,
    show: Option<TraktMedia>,
}

impl TraktEntry {
    /// Map a list or search entry to its catalog identity. Entries of
    /// unknown type or without a trakt id are dropped.
    fn into_catalog_item(self) -> Option<CatalogItem> {
        let (media_type, media) = if let Some(movie) = self.movie {
            (MediaType::Movie, movie)
        } else if let Some(show) = self.show {
            (MediaType::Show, show)
        } else {
            debug!("Skipping entry of unknown type {:?}", self.item_type);
            return None;
        };
        let trakt_id = media.ids.trakt?;
        Some(CatalogItem {
            media_type,
            trakt_id,
            title: media.title,
        })
    }
}

fn authed(builder: RequestBuilder, token: &str, client_id: &str) -> RequestBuilder {
    builder
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", token))
        .header("trakt-api-version", "2")
        .header("trakt-api-key", client_id)
}

/// Issue a request with bounded retry on HTTP 429. The sleep duration
/// comes from the Retry-After header, defaulting to one second; exhausting
/// the attempts is a run-fatal error.
async fn send_rate_limited(
    url: &str,
    build: impl Fn() -> RequestBuilder,
) -> Result<Response, TraktError> {
    for _ in 0..RATE_LIMIT_MAX_ATTEMPTS {
        let response = build().send().await?;
        if response.status() != StatusCode::TOO_MANY_REQUESTS {
            return Ok(response);
        }
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        warn!(
            "Rate limit exceeded on {}. Retrying after {} seconds...",
            url, retry_after
        );
        sleep(Duration::from_secs(retry_after)).await;
    }
    Err(TraktError::RateLimitExhausted {
        url: url.to_string(),
        attempts: RATE_LIMIT_MAX_ATTEMPTS,
    })
}

async fn unexpected_status(url: &str, response: Response) -> TraktError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    TraktError::UnexpectedStatus {
        url: url.to_string(),
        status,
        body,
    }
}

fn list_items_url(base: &str, username: &str, list_name: &str) -> String {
    format!(
        "{}/users/{}/lists/{}/items/",
        base,
        urlencoding::encode(username),
        urlencoding::encode(list_name)
    )
}

/// Fetch the current contents of a list. `Ok(None)` means the list does
/// not exist yet (404) and has to be created.
pub async fn get_list_items(
    client: &Client,
    base: &str,
    token: &str,
    client_id: &str,
    username: &str,
    list_name: &str,
) -> Result<Option<ListSnapshot>, TraktError> {
    let url = list_items_url(base, username, list_name);
    let response = authed(client.get(&url), token, client_id).send().await?;

    match response.status() {
        StatusCode::OK => {
            let entries: Vec<TraktEntry> = response.json().await?;
            let items = entries
                .into_iter()
                .filter_map(TraktEntry::into_catalog_item)
                .collect();
            Ok(Some(ListSnapshot::new(items)))
        }
        StatusCode::NOT_FOUND => Ok(None),
        _ => Err(unexpected_status(&url, response).await),
    }
}

/// Create the per-service list with the fixed description template and
/// default display/sort options. Expects 201.
pub async fn create_list(
    client: &Client,
    base: &str,
    token: &str,
    client_id: &str,
    username: &str,
    service: StreamingService,
) -> Result<(), TraktError> {
    let url = format!("{}/users/{}/lists/", base, urlencoding::encode(username));
    let payload = serde_json::json!({
        "name": service.list_name(),
        "description": format!(
            "Top 10 Movies and TV Shows on {} in the World, updated daily",
            service.display_name()
        ),
        "privacy": "public",
        "display_numbers": true,
        "allow_comments": true,
        "sort_by": "rank",
        "sort_how": "asc",
    });

    let response = send_rate_limited(&url, || {
        authed(client.post(&url), token, client_id).json(&payload)
    })
    .await?;

    if response.status() != StatusCode::CREATED {
        return Err(unexpected_status(&url, response).await);
    }
    Ok(())
}

/// Text search across movies and shows, returning candidates in the API's
/// relevance order.
pub async fn search(
    client: &Client,
    base: &str,
    token: &str,
    client_id: &str,
    query: &str,
) -> Result<Vec<CatalogItem>, TraktError> {
    let url = format!(
        "{}/search/movie,show?query={}&fields=title&extended=full",
        base,
        urlencoding::encode(query)
    );

    let response = send_rate_limited(&url, || authed(client.get(&url), token, client_id)).await?;

    if response.status() != StatusCode::OK {
        return Err(unexpected_status(&url, response).await);
    }

    let entries: Vec<TraktEntry> = response.json().await?;
    Ok(entries
        .into_iter()
        .filter_map(TraktEntry::into_catalog_item)
        .collect())
}

/// Add a batch of resolved items to a list in one call. Expects 201.
pub async fn add_items(
    client: &Client,
    base: &str,
    token: &str,
    client_id: &str,
    username: &str,
    list_name: &str,
    items: &[CatalogItem],
) -> Result<(), TraktError> {
    let url = format!(
        "{}/users/{}/lists/{}/items",
        base,
        urlencoding::encode(username),
        urlencoding::encode(list_name)
    );
    let payload = build_sync_payload(items);

    let response = send_rate_limited(&url, || {
        authed(client.post(&url), token, client_id).json(&payload)
    })
    .await?;

    if response.status() != StatusCode::CREATED {
        return Err(unexpected_status(&url, response).await);
    }
    Ok(())
}

/// Remove a batch of items from a list in one call. Expects 200.
pub async fn remove_items(
    client: &Client,
    base: &str,
    token: &str,
    client_id: &str,
    username: &str,
    list_name: &str,
    items: &[CatalogItem],
) -> Result<(), TraktError> {
    let url = format!(
        "{}/users/{}/lists/{}/items/remove",
        base,
        urlencoding::encode(username),
        urlencoding::encode(list_name)
    );
    let payload = build_sync_payload(items);

    let response = send_rate_limited(&url, || {
        authed(client.post(&url), token, client_id).json(&payload)
    })
    .await?;

    if response.status() != StatusCode::OK {
        return Err(unexpected_status(&url, response).await);
    }
    Ok(())
}

/// Batch payload shared by the add and remove endpoints:
/// `{"movies": [{"ids": {"trakt": id}}], "shows": [...]}`.
fn build_sync_payload(items: &[CatalogItem]) -> serde_json::Value {
    let mut movies = Vec::new();
    let mut shows = Vec::new();

    for item in items {
        let entry = serde_json::json!({ "ids": { "trakt": item.trakt_id } });
        match item.media_type {
            MediaType::Movie => movies.push(entry),
            MediaType::Show => shows.push(entry),
        }
    }

    serde_json::json!({ "movies": movies, "shows": shows })
}
