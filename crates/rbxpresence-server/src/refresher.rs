//! One refresh cycle: presence lookup, catalog lookup, snapshot install.

use std::sync::Arc;

use rbxpresence_core::StateSnapshot;
use rbxpresence_providers::{
    PresenceProvider, ProviderError, ProviderResult, snapshot_from_universe,
};
use tracing::{debug, info, warn};

use crate::error::{ServerError, ServerResult};
use crate::slot::SnapshotSlot;

/// What a successful cycle did to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new snapshot was installed.
    Updated {
        /// Universe id of the new snapshot.
        universe_id: i64,
    },
    /// The user is not in a game; the slot was left untouched.
    NoPresence,
}

/// Produces a new snapshot for `user_id`, or `None` if the user has no
/// active universe.
///
/// The catalog lookup is only issued when the first presence entry carries
/// a non-zero universe id. An empty catalog list yields the empty snapshot,
/// the same as an entry whose fields are all missing.
pub async fn refresh_once(
    provider: &dyn PresenceProvider,
    user_id: &str,
) -> ProviderResult<Option<StateSnapshot>> {
    if user_id.trim().is_empty() {
        return Err(ProviderError::bad_request("user id must not be empty"));
    }

    let presences = provider.fetch_presences(user_id).await?;

    let Some(universe_id) = presences.first().and_then(|p| p.active_universe()) else {
        debug!(
            user_id,
            entries = presences.len(),
            "No active universe for user"
        );
        return Ok(None);
    };

    let universes = provider.fetch_universes(universe_id).await?;

    let Some(universe) = universes.first() else {
        warn!(universe_id, "Catalog returned no entries, serving empty snapshot");
        return Ok(Some(StateSnapshot::default()));
    };

    Ok(Some(snapshot_from_universe(universe)))
}

/// Runs refresh cycles for one user and installs results into a slot.
pub struct Refresher {
    provider: Arc<dyn PresenceProvider>,
    user_id: String,
    slot: SnapshotSlot,
}

impl Refresher {
    /// Creates a refresher. The user id must be non-empty.
    pub fn new(
        provider: Arc<dyn PresenceProvider>,
        user_id: impl Into<String>,
        slot: SnapshotSlot,
    ) -> ServerResult<Self> {
        let user_id = user_id.into().trim().to_string();
        if user_id.is_empty() {
            return Err(ServerError::config("user id must not be empty"));
        }

        Ok(Self {
            provider,
            user_id,
            slot,
        })
    }

    /// The tracked user id.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Runs one cycle.
    ///
    /// The slot is written only when a new snapshot was produced; on
    /// "no presence" and on every error it keeps its previous value.
    pub async fn run_cycle(&self) -> ProviderResult<RefreshOutcome> {
        match refresh_once(self.provider.as_ref(), &self.user_id).await? {
            Some(snapshot) => {
                let universe_id = snapshot.id;
                info!(
                    user_id = %self.user_id,
                    universe_id,
                    name = %snapshot.name,
                    creator = %snapshot.creator,
                    "Snapshot updated"
                );
                self.slot.replace(snapshot).await;
                Ok(RefreshOutcome::Updated { universe_id })
            }
            None => {
                debug!(user_id = %self.user_id, "User not in a game, keeping snapshot");
                Ok(RefreshOutcome::NoPresence)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use rbxpresence_providers::raw::RawCreator;
    use rbxpresence_providers::{BoxFuture, ProviderErrorCode, RawPresence, RawUniverse};

    /// Provider returning canned data and counting calls.
    struct ScriptedProvider {
        presence: Result<Vec<RawPresence>, ProviderErrorCode>,
        catalog: Result<Vec<RawUniverse>, ProviderErrorCode>,
        presence_calls: AtomicU32,
        catalog_calls: AtomicU32,
        requested_universe: Mutex<Option<i64>>,
    }

    impl ScriptedProvider {
        fn new(
            presence: Result<Vec<RawPresence>, ProviderErrorCode>,
            catalog: Result<Vec<RawUniverse>, ProviderErrorCode>,
        ) -> Self {
            Self {
                presence,
                catalog,
                presence_calls: AtomicU32::new(0),
                catalog_calls: AtomicU32::new(0),
                requested_universe: Mutex::new(None),
            }
        }

        fn catalog_calls(&self) -> u32 {
            self.catalog_calls.load(Ordering::SeqCst)
        }
    }

    impl PresenceProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn fetch_presences<'a>(
            &'a self,
            _user_id: &'a str,
        ) -> BoxFuture<'a, ProviderResult<Vec<RawPresence>>> {
            self.presence_calls.fetch_add(1, Ordering::SeqCst);
            let result = self
                .presence
                .clone()
                .map_err(|code| ProviderError::new(code, "scripted presence failure"));
            Box::pin(async move { result })
        }

        fn fetch_universes(
            &self,
            universe_id: i64,
        ) -> BoxFuture<'_, ProviderResult<Vec<RawUniverse>>> {
            self.catalog_calls.fetch_add(1, Ordering::SeqCst);
            *self.requested_universe.lock().unwrap() = Some(universe_id);
            let result = self
                .catalog
                .clone()
                .map_err(|code| ProviderError::new(code, "scripted catalog failure"));
            Box::pin(async move { result })
        }
    }

    fn in_universe(id: i64) -> Vec<RawPresence> {
        vec![RawPresence {
            universe_id: Some(id),
            ..Default::default()
        }]
    }

    fn game() -> Vec<RawUniverse> {
        vec![RawUniverse {
            id: Some(123),
            name: Some("Game".into()),
            description: Some("Desc".into()),
            creator: Some(RawCreator {
                name: Some("Dev".into()),
            }),
        }]
    }

    async fn seeded_slot() -> SnapshotSlot {
        let slot = SnapshotSlot::new();
        slot.replace(StateSnapshot::new(7, "Old", "Old desc", "Old dev"))
            .await;
        slot
    }

    #[tokio::test]
    async fn two_step_success_builds_snapshot() {
        let provider = ScriptedProvider::new(Ok(in_universe(123)), Ok(game()));

        let snapshot = refresh_once(&provider, "42").await.unwrap();

        assert_eq!(snapshot, Some(StateSnapshot::new(123, "Game", "Desc", "Dev")));
        assert_eq!(*provider.requested_universe.lock().unwrap(), Some(123));
    }

    #[tokio::test]
    async fn zero_universe_skips_catalog() {
        let provider = ScriptedProvider::new(Ok(in_universe(0)), Ok(game()));

        let snapshot = refresh_once(&provider, "42").await.unwrap();

        assert!(snapshot.is_none());
        assert_eq!(provider.catalog_calls(), 0);
    }

    #[tokio::test]
    async fn empty_presence_list_skips_catalog() {
        let provider = ScriptedProvider::new(Ok(vec![]), Ok(game()));

        assert!(refresh_once(&provider, "42").await.unwrap().is_none());
        assert_eq!(provider.catalog_calls(), 0);
    }

    #[tokio::test]
    async fn empty_user_id_is_rejected_before_any_call() {
        let provider = ScriptedProvider::new(Ok(in_universe(123)), Ok(game()));

        let err = refresh_once(&provider, "").await.unwrap_err();

        assert_eq!(err.code(), ProviderErrorCode::BadRequest);
        assert_eq!(provider.presence_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_catalog_yields_empty_snapshot() {
        let provider = ScriptedProvider::new(Ok(in_universe(123)), Ok(vec![]));

        let snapshot = refresh_once(&provider, "42").await.unwrap();
        assert_eq!(snapshot, Some(StateSnapshot::default()));
        assert_eq!(provider.catalog_calls(), 1);
    }

    #[tokio::test]
    async fn empty_catalog_replaces_previous_snapshot() {
        let slot = seeded_slot().await;
        let provider = Arc::new(ScriptedProvider::new(Ok(in_universe(123)), Ok(vec![])));
        let refresher = Refresher::new(provider, "42", slot.clone()).unwrap();

        let outcome = refresher.run_cycle().await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Updated { universe_id: 0 });
        assert!(slot.current().await.is_empty());
    }

    #[tokio::test]
    async fn cycle_installs_new_snapshot() {
        let slot = seeded_slot().await;
        let provider = Arc::new(ScriptedProvider::new(Ok(in_universe(123)), Ok(game())));
        let refresher = Refresher::new(provider, "42", slot.clone()).unwrap();

        let outcome = refresher.run_cycle().await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Updated { universe_id: 123 });
        assert_eq!(
            slot.current().await,
            StateSnapshot::new(123, "Game", "Desc", "Dev")
        );
    }

    #[tokio::test]
    async fn presence_failure_keeps_snapshot() {
        let slot = seeded_slot().await;
        let before = slot.current().await;
        let provider = Arc::new(ScriptedProvider::new(
            Err(ProviderErrorCode::ServerError),
            Ok(game()),
        ));
        let refresher = Refresher::new(provider.clone(), "42", slot.clone()).unwrap();

        let err = refresher.run_cycle().await.unwrap_err();

        assert_eq!(err.code(), ProviderErrorCode::ServerError);
        assert_eq!(slot.current().await, before);
        assert_eq!(provider.catalog_calls(), 0);
    }

    #[tokio::test]
    async fn catalog_failure_keeps_snapshot() {
        let slot = seeded_slot().await;
        let before = slot.current().await;
        let provider = Arc::new(ScriptedProvider::new(
            Ok(in_universe(123)),
            Err(ProviderErrorCode::NetworkError),
        ));
        let refresher = Refresher::new(provider, "42", slot.clone()).unwrap();

        assert!(refresher.run_cycle().await.is_err());
        assert_eq!(slot.current().await, before);
    }

    #[tokio::test]
    async fn no_presence_keeps_snapshot() {
        let slot = seeded_slot().await;
        let before = slot.current().await;
        let provider = Arc::new(ScriptedProvider::new(Ok(in_universe(0)), Ok(game())));
        let refresher = Refresher::new(provider, "42", slot.clone()).unwrap();

        let outcome = refresher.run_cycle().await.unwrap();

        assert_eq!(outcome, RefreshOutcome::NoPresence);
        assert_eq!(slot.current().await, before);
    }

    #[test]
    fn refresher_requires_user_id() {
        let provider = Arc::new(ScriptedProvider::new(Ok(vec![]), Ok(vec![])));
        let result = Refresher::new(provider, "  ", SnapshotSlot::new());
        assert!(matches!(result, Err(ServerError::Config { .. })));
    }
}
