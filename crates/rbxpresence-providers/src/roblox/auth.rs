//! Cookie authentication for the Roblox web APIs.

use reqwest::header::HeaderValue;

use crate::error::{ProviderError, ProviderResult};

/// Name of the session cookie the web APIs authenticate with.
pub const SECURITY_COOKIE_NAME: &str = ".ROBLOSECURITY";

/// Builds the `Cookie` header value for a token.
///
/// The token is used byte-for-byte. Returns `None` for an absent or empty
/// token, meaning the request goes out unauthenticated.
pub fn security_cookie(token: Option<&str>) -> Option<String> {
    let token = token.filter(|t| !t.is_empty())?;
    Some(format!("{SECURITY_COOKIE_NAME}={token}"))
}

/// Builds a sensitive header value so the token never shows up in logs.
pub(crate) fn cookie_header(token: Option<&str>) -> ProviderResult<Option<HeaderValue>> {
    let Some(cookie) = security_cookie(token) else {
        return Ok(None);
    };

    let mut value = HeaderValue::from_str(&cookie).map_err(|e| {
        ProviderError::configuration("security token contains invalid header characters")
            .with_source(e)
    })?;
    value.set_sensitive(true);
    Ok(Some(value))
}
