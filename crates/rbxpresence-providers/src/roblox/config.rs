//! Roblox provider configuration.

use std::fmt;
use std::time::Duration;

use url::Url;

/// Base URL of the presence service.
pub const DEFAULT_PRESENCE_BASE: &str = "https://presence.roblox.com";

/// Base URL of the games catalog service.
pub const DEFAULT_GAMES_BASE: &str = "https://games.roblox.com";

/// Per-request timeout applied by the HTTP client.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for [`RobloxProvider`](super::RobloxProvider).
#[derive(Clone)]
pub struct RobloxConfig {
    /// Base URL of the presence service.
    pub presence_base: String,
    /// Base URL of the games catalog service.
    pub games_base: String,
    /// Optional `.ROBLOSECURITY` token.
    pub token: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for RobloxConfig {
    fn default() -> Self {
        Self {
            presence_base: DEFAULT_PRESENCE_BASE.to_string(),
            games_base: DEFAULT_GAMES_BASE.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// Hand-written so the token never reaches the logs.
impl fmt::Debug for RobloxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobloxConfig")
            .field("presence_base", &self.presence_base)
            .field("games_base", &self.games_base)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RobloxConfig {
    /// Creates a configuration pointing at the public services.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the security token, kept verbatim. An empty token is
    /// treated as absent.
    pub fn with_token(mut self, token: Option<impl Into<String>>) -> Self {
        self.token = token.map(Into::into).filter(|t| !t.is_empty());
        self
    }

    /// Builder: set the presence service base URL.
    pub fn with_presence_base(mut self, base: impl Into<String>) -> Self {
        self.presence_base = base.into();
        self
    }

    /// Builder: set the games service base URL.
    pub fn with_games_base(mut self, base: impl Into<String>) -> Self {
        self.games_base = base.into();
        self
    }

    /// Builder: set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns true if requests will carry the security cookie.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Checks that both base URLs are absolute http(s) URLs and the timeout
    /// is non-zero.
    pub fn validate(&self) -> Result<(), String> {
        validate_base("presence", &self.presence_base)?;
        validate_base("games", &self.games_base)?;

        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".into());
        }

        Ok(())
    }

    /// Full URL of the presence lookup.
    pub fn presence_url(&self) -> String {
        endpoint(&self.presence_base, "v1/presence/users")
    }

    /// Full URL of the catalog lookup, without query string.
    pub fn games_url(&self) -> String {
        endpoint(&self.games_base, "v1/games")
    }
}

fn validate_base(label: &str, base: &str) -> Result<(), String> {
    let url = Url::parse(base).map_err(|e| format!("invalid {label} base URL '{base}': {e}"))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!(
            "invalid {label} base URL '{base}': unsupported scheme '{other}'"
        )),
    }
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}
