use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, info};

const ACTIVATE_URL: &str = "https://trakt.tv/activate";

/// Fixed device-flow polling cadence: one poll every 5 seconds, at most 40
/// attempts, so the user has roughly 200 seconds to activate.
pub const POLL_INTERVAL_SECS: u64 = 5;
pub const POLL_MAX_ATTEMPTS: u32 = 40;

#[derive(Debug, Deserialize)]
pub struct DeviceCodeGrant {
    pub user_code: String,
    pub device_code: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Probe the API with a lightweight authenticated call. A 200 means the
/// token is usable; any other status means the device flow has to run.
pub async fn validate_token(
    client: &Client,
    base: &str,
    client_id: &str,
    username: &str,
    token: &str,
) -> Result<bool> {
    let url = format!("{}/users/{}", base, urlencoding::encode(username));
    let response = client
        .get(&url)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", token))
        .header("trakt-api-version", "2")
        .header("trakt-api-key", client_id)
        .send()
        .await?;

    debug!("Token probe against {} returned {}", url, response.status());
    Ok(response.status() == StatusCode::OK)
}

/// Request a device code for the authorization handshake.
pub async fn request_device_code(
    client: &Client,
    base: &str,
    client_id: &str,
) -> Result<DeviceCodeGrant> {
    let payload = serde_json::json!({ "client_id": client_id });
    let response = client
        .post(format!("{}/oauth/device/code", base))
        .header("Content-Type", "application/json")
        .header("trakt-api-key", client_id)
        .json(&payload)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow!("Failed to get device code: {} - {}", status, body));
    }

    Ok(response.json().await?)
}

/// Show the activation code and wait for the user to approve the device.
pub fn present_activation_code(grant: &DeviceCodeGrant) {
    eprintln!();
    eprintln!("Please activate this device at {}", ACTIVATE_URL);
    eprintln!("Activation code: {}", grant.user_code);
    eprintln!();
    info!("Waiting for device activation");
}

/// Poll the token endpoint until the user activates the device. HTTP 400
/// means "not yet authorized" and keeps the loop going; any other non-200
/// aborts the attempt. Returns the bare access token.
pub async fn poll_device_token(
    client: &Client,
    base: &str,
    client_id: &str,
    client_secret: &str,
    device_code: &str,
) -> Result<String> {
    let url = format!("{}/oauth/device/token", base);
    let payload = serde_json::json!({
        "code": device_code,
        "client_id": client_id,
        "client_secret": client_secret,
    });

    for attempt in 1..=POLL_MAX_ATTEMPTS {
        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("trakt-api-key", client_id)
            .header("trakt-api-version", "2")
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let token: TokenResponse = response.json().await?;
                info!("Device activated after {} polls", attempt);
                return Ok(token.access_token);
            }
            StatusCode::BAD_REQUEST => {
                // Authorization still pending.
                sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(anyhow!(
                    "Failed to obtain OAuth token: {} - {}",
                    status,
                    body
                ));
            }
        }
    }

    Err(anyhow!(
        "Device activation timed out after {} polls",
        POLL_MAX_ATTEMPTS
    ))
}
