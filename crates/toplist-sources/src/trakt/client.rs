use anyhow::Result;
use reqwest::Client;
use toplist_config::{TokenStore, TraktConfig};
use toplist_models::{CatalogItem, ListSnapshot, StreamingService};
use tracing::info;

use crate::error::TraktError;
use crate::http::create_http_client;
use crate::trakt::{api, auth};

const API_BASE: &str = "https://api.trakt.tv";

/// Authenticated Trakt API client. Holds the credential explicitly; the
/// token is read from the store once during `authenticate` and written
/// back only when the device flow issues a fresh one.
pub struct TraktClient {
    http: Client,
    api_base: String,
    client_id: String,
    client_secret: String,
    username: String,
    access_token: Option<String>,
}

impl TraktClient {
    pub fn new(config: &TraktConfig) -> Self {
        Self {
            http: create_http_client(),
            api_base: API_BASE.to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            username: config.username.clone(),
            access_token: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    fn access_token(&self) -> Result<&str, TraktError> {
        self.access_token
            .as_deref()
            .ok_or(TraktError::NotAuthenticated)
    }

    /// Obtain a usable access token: reuse the persisted one when the API
    /// accepts it, otherwise run the device authorization flow and persist
    /// the result. Failure here means the run cannot proceed at all.
    pub async fn authenticate(&mut self, store: &TokenStore) -> Result<()> {
        if let Some(saved) = store.load() {
            if auth::validate_token(
                &self.http,
                &self.api_base,
                &self.client_id,
                &self.username,
                &saved,
            )
            .await?
            {
                info!("Using saved Trakt access token");
                self.access_token = Some(saved);
                return Ok(());
            }
            info!("Saved Trakt token rejected by the API, starting device authorization");
            store.clear()?;
        }

        let grant = auth::request_device_code(&self.http, &self.api_base, &self.client_id).await?;
        auth::present_activation_code(&grant);

        let token = auth::poll_device_token(
            &self.http,
            &self.api_base,
            &self.client_id,
            &self.client_secret,
            &grant.device_code,
        )
        .await?;

        store.save(&token)?;
        self.access_token = Some(token);
        info!("Authenticated to Trakt");
        Ok(())
    }

    /// Run the device flow unconditionally, ignoring any persisted token.
    pub async fn reauthenticate(&mut self, store: &TokenStore) -> Result<()> {
        store.clear()?;
        self.access_token = None;
        self.authenticate(store).await
    }

    pub async fn list_items(&self, list_name: &str) -> Result<Option<ListSnapshot>, TraktError> {
        api::get_list_items(
            &self.http,
            &self.api_base,
            self.access_token()?,
            &self.client_id,
            &self.username,
            list_name,
        )
        .await
    }

    pub async fn create_list(&self, service: StreamingService) -> Result<(), TraktError> {
        api::create_list(
            &self.http,
            &self.api_base,
            self.access_token()?,
            &self.client_id,
            &self.username,
            service,
        )
        .await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, TraktError> {
        api::search(
            &self.http,
            &self.api_base,
            self.access_token()?,
            &self.client_id,
            query,
        )
        .await
    }

    pub async fn add_items(
        &self,
        list_name: &str,
        items: &[CatalogItem],
    ) -> Result<(), TraktError> {
        api::add_items(
            &self.http,
            &self.api_base,
            self.access_token()?,
            &self.client_id,
            &self.username,
            list_name,
            items,
        )
        .await
    }

    pub async fn remove_items(
        &self,
        list_name: &str,
        items: &[CatalogItem],
    ) -> Result<(), TraktError> {
        api::remove_items(
            &self.http,
            &self.api_base,
            self.access_token()?,
            &self.client_id,
            &self.username,
            list_name,
            items,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trakt::testing::{StubResponse, StubServer};
    use tempfile::TempDir;

    fn client_against(base_url: &str) -> TraktClient {
        TraktClient {
            http: create_http_client(),
            api_base: base_url.to_string(),
            client_id: "cid".to_string(),
            client_secret: "csecret".to_string(),
            username: "alice".to_string(),
            access_token: None,
        }
    }

    fn store_with(dir: &TempDir, token: &str) -> TokenStore {
        let store = TokenStore::new(dir.path().join("token.txt"));
        store.save(token).unwrap();
        store
    }

    #[tokio::test]
    async fn valid_persisted_token_skips_the_device_flow() {
        let server = StubServer::start(|path, _| {
            if path.starts_with("/users/") {
                StubResponse::new(200, "{}")
            } else {
                StubResponse::new(500, "{}")
            }
        })
        .await;
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, "tok123");

        let mut client = client_against(&server.base_url);
        client.authenticate(&store).await.unwrap();

        assert!(client.is_authenticated());
        assert_eq!(store.load(), Some("tok123".to_string()));
        // Only the validation probe went out.
        assert_eq!(server.requests(), vec!["/users/alice".to_string()]);
    }

    #[tokio::test]
    async fn rejected_token_runs_the_device_flow_and_persists_the_grant() {
        let server = StubServer::start(|path, _| match path {
            p if p.starts_with("/users/") => StubResponse::new(401, "{}"),
            "/oauth/device/code" => {
                StubResponse::new(200, r#"{"user_code": "ABCD1234", "device_code": "dev-1"}"#)
            }
            "/oauth/device/token" => StubResponse::new(200, r#"{"access_token": "fresh-token"}"#),
            _ => StubResponse::new(500, "{}"),
        })
        .await;
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, "stale");

        let mut client = client_against(&server.base_url);
        client.authenticate(&store).await.unwrap();

        assert!(client.is_authenticated());
        assert_eq!(store.load(), Some("fresh-token".to_string()));
        let paths = server.requests();
        assert!(paths.contains(&"/oauth/device/code".to_string()));
        assert!(paths.contains(&"/oauth/device/token".to_string()));
    }

    #[tokio::test]
    async fn failed_device_flow_leaves_no_token_behind() {
        let server = StubServer::start(|path, _| {
            if path.starts_with("/users/") {
                StubResponse::new(401, "{}")
            } else {
                StubResponse::new(500, "{}")
            }
        })
        .await;
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, "stale");

        let mut client = client_against(&server.base_url);
        assert!(client.authenticate(&store).await.is_err());

        assert!(!client.is_authenticated());
        assert_eq!(store.load(), None);
    }
}
