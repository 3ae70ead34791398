//! Low-level HTTP client for the presence and games APIs.

use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::raw::{CatalogEnvelope, PresenceEnvelope, RawPresence, RawUniverse};

use super::auth::cookie_header;
use super::config::RobloxConfig;

/// Roblox web API client.
#[derive(Debug, Clone)]
pub struct RobloxClient {
    http_client: reqwest::Client,
    presence_url: String,
    games_url: String,
}

impl RobloxClient {
    /// Creates a client from a validated configuration.
    ///
    /// The JSON content type and the optional security cookie are installed
    /// as default headers, so every request carries them.
    pub fn new(config: &RobloxConfig) -> ProviderResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(cookie) = cookie_header(config.token.as_deref())? {
            headers.insert(COOKIE, cookie);
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            http_client,
            presence_url: config.presence_url(),
            games_url: config.games_url(),
        })
    }

    /// Fetches the presence entries for one user.
    pub async fn user_presences(&self, user_id: i64) -> ProviderResult<Vec<RawPresence>> {
        let body = serde_json::json!({ "userIds": [user_id] });
        let request = self.http_client.post(&self.presence_url).json(&body);

        let envelope: PresenceEnvelope = self.execute(request, "presence").await?;
        debug!(
            user_id,
            entries = envelope.user_presences.len(),
            "Fetched presence"
        );
        Ok(envelope.user_presences)
    }

    /// Fetches the catalog entries for one universe.
    pub async fn games(&self, universe_id: i64) -> ProviderResult<Vec<RawUniverse>> {
        let request = self
            .http_client
            .get(&self.games_url)
            .query(&[("universeIds", universe_id)]);

        let envelope: CatalogEnvelope = self.execute(request, "universe").await?;
        debug!(universe_id, entries = envelope.data.len(), "Fetched universe");
        Ok(envelope.data)
    }

    /// Sends a request, maps the status, and decodes the JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        lookup: &'static str,
    ) -> ProviderResult<T> {
        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("{} request timed out", lookup)
            } else if e.is_connect() {
                format!("{} connection failed: {}", lookup, e)
            } else {
                format!("{} request failed: {}", lookup, e)
            };
            ProviderError::network(message).with_source(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(lookup, status, retry_after, &body));
        }

        let body = response.bytes().await.map_err(|e| {
            ProviderError::network(format!("failed to read {} response: {}", lookup, e))
                .with_source(e)
        })?;

        debug!(lookup, body = %String::from_utf8_lossy(&body), "Upstream response");

        serde_json::from_slice(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse {} response: {}", lookup, e))
                .with_source(e)
        })
    }
}

/// Maps a non-success status to a provider error.
fn status_error(
    lookup: &str,
    status: StatusCode,
    retry_after: Option<u64>,
    body: &str,
) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED => {
            ProviderError::authentication(format!("{} lookup rejected the security token", lookup))
        }
        StatusCode::FORBIDDEN => {
            ProviderError::authorization(format!("{} lookup access denied", lookup))
        }
        StatusCode::NOT_FOUND => ProviderError::not_found(format!("{} endpoint not found", lookup)),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(format!(
            "{} rate limit exceeded{}",
            lookup,
            retry_after
                .map(|s| format!(", retry after {} seconds", s))
                .unwrap_or_default()
        )),
        _ => ProviderError::server(format!("{} API error ({}): {}", lookup, status, body.trim())),
    }
}
