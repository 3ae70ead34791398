//! Roblox presence and catalog provider.
//!
//! Two endpoints are consumed:
//!
//! - `POST {presence}/v1/presence/users` with `{"userIds":[<id>]}`
//! - `GET {games}/v1/games?universeIds=<id>`
//!
//! Both requests carry `Content-Type: application/json` and, when a
//! security token is configured, a `.ROBLOSECURITY` cookie.
//!
//! # Example
//!
//! ```ignore
//! use rbxpresence_providers::roblox::{RobloxConfig, RobloxProvider};
//!
//! let provider = RobloxProvider::new(RobloxConfig::new().with_token(token))?;
//! let presences = provider.fetch_presences("42").await?;
//! ```

mod auth;
mod client;
mod config;
mod provider;

pub use auth::{SECURITY_COOKIE_NAME, security_cookie};
pub use client::RobloxClient;
pub use config::{DEFAULT_GAMES_BASE, DEFAULT_PRESENCE_BASE, RobloxConfig};
pub use provider::RobloxProvider;
