//! PresenceProvider trait definition.
//!
//! The refresher depends only on this trait, so tests can drive it with
//! scripted providers and the daemon with [`RobloxProvider`].
//!
//! [`RobloxProvider`]: crate::roblox::RobloxProvider

use std::future::Future;
use std::pin::Pin;

use crate::error::ProviderResult;
use crate::raw::{RawPresence, RawUniverse};

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so the daemon can hold an
/// `Arc<dyn PresenceProvider>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of presence and catalog data.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync`; one instance is shared by the
///   scheduler task for the life of the process
/// - A non-success upstream status is an error, not an empty result
/// - Implementations do not retry; the scheduler's fixed interval is the
///   retry policy
pub trait PresenceProvider: Send + Sync {
    /// Returns the name of this provider (e.g. "roblox").
    fn name(&self) -> &str;

    /// Looks up the presence entries for a single user.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport failures, non-success statuses,
    /// undecodable bodies, or a malformed user id.
    fn fetch_presences<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<RawPresence>>>;

    /// Looks up catalog entries for a universe.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport failures, non-success statuses
    /// or undecodable bodies.
    fn fetch_universes(&self, universe_id: i64) -> BoxFuture<'_, ProviderResult<Vec<RawUniverse>>>;
}
