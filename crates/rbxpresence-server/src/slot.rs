//! The single shared snapshot slot.
//!
//! The refresher is the only writer; HTTP handlers are readers. The whole
//! snapshot is swapped under the write guard and cloned under the read
//! guard, so a reader sees either the old value or the new one, never a mix.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rbxpresence_core::StateSnapshot;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct SlotInner {
    snapshot: StateSnapshot,
    updated_at: Option<DateTime<Utc>>,
}

/// Cheaply clonable handle to the current snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSlot {
    inner: Arc<RwLock<SlotInner>>,
}

impl SnapshotSlot {
    /// Creates a slot holding the initial, empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current snapshot.
    pub async fn current(&self) -> StateSnapshot {
        self.inner.read().await.snapshot.clone()
    }

    /// Replaces the snapshot wholesale.
    pub async fn replace(&self, snapshot: StateSnapshot) {
        let mut inner = self.inner.write().await;
        debug!(
            old_id = inner.snapshot.id,
            new_id = snapshot.id,
            "Replacing snapshot"
        );
        inner.snapshot = snapshot;
        inner.updated_at = Some(Utc::now());
    }

    /// When the snapshot was last replaced, if ever.
    pub async fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty() {
        let slot = SnapshotSlot::new();
        assert!(slot.current().await.is_empty());
        assert!(slot.updated_at().await.is_none());
    }

    #[tokio::test]
    async fn replace_is_visible_to_clones() {
        let slot = SnapshotSlot::new();
        let reader = slot.clone();

        slot.replace(StateSnapshot::new(123, "Game", "Desc", "Dev"))
            .await;

        assert_eq!(
            reader.current().await,
            StateSnapshot::new(123, "Game", "Desc", "Dev")
        );
        assert!(reader.updated_at().await.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_readers_never_see_mixed_fields() {
        let slot = SnapshotSlot::new();
        slot.replace(StateSnapshot::new(1, "1", "1", "1")).await;

        let writer = {
            let slot = slot.clone();
            tokio::spawn(async move {
                for i in 2..500_i64 {
                    let s = i.to_string();
                    slot.replace(StateSnapshot::new(i, s.clone(), s.clone(), s))
                        .await;
                    tokio::task::yield_now().await;
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let slot = slot.clone();
                tokio::spawn(async move {
                    for _ in 0..500 {
                        let snapshot = slot.current().await;
                        let id = snapshot.id.to_string();
                        assert_eq!(snapshot.name, id);
                        assert_eq!(snapshot.description, id);
                        assert_eq!(snapshot.creator, id);
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }
}
