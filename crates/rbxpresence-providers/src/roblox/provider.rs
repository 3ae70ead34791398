//! [`PresenceProvider`] implementation backed by the Roblox web APIs.

use tracing::info;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, PresenceProvider};
use crate::raw::{RawPresence, RawUniverse};

use super::client::RobloxClient;
use super::config::RobloxConfig;

const PROVIDER_NAME: &str = "roblox";

/// Roblox presence provider.
#[derive(Debug)]
pub struct RobloxProvider {
    client: RobloxClient,
    authenticated: bool,
}

impl RobloxProvider {
    /// Creates a provider, validating the configuration first.
    pub fn new(config: RobloxConfig) -> ProviderResult<Self> {
        config
            .validate()
            .map_err(|e| ProviderError::configuration(e).with_provider(PROVIDER_NAME))?;

        let client = RobloxClient::new(&config).map_err(|e| e.with_provider(PROVIDER_NAME))?;

        info!(
            presence = %config.presence_base,
            games = %config.games_base,
            authenticated = config.is_authenticated(),
            timeout_secs = config.timeout.as_secs_f64(),
            "Roblox provider initialized"
        );

        Ok(Self {
            client,
            authenticated: config.is_authenticated(),
        })
    }

    /// Returns true if requests carry the security cookie.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// Parses the string form of a user id.
pub(crate) fn parse_user_id(user_id: &str) -> ProviderResult<i64> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::bad_request("user id must not be empty"));
    }

    trimmed.parse::<i64>().map_err(|e| {
        ProviderError::bad_request(format!("user id '{}' is not an integer", trimmed))
            .with_source(e)
    })
}

impl PresenceProvider for RobloxProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch_presences<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<RawPresence>>> {
        Box::pin(async move {
            let user_id = parse_user_id(user_id).map_err(|e| e.with_provider(PROVIDER_NAME))?;
            self.client
                .user_presences(user_id)
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))
        })
    }

    fn fetch_universes(&self, universe_id: i64) -> BoxFuture<'_, ProviderResult<Vec<RawUniverse>>> {
        Box::pin(async move {
            self.client
                .games(universe_id)
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))
        })
    }
}
