//! Typed views of the upstream payloads.
//!
//! Only the fields the daemon reads are modelled. Everything is optional
//! because the upstream services omit or null fields freely (a user who is
//! online but not in a game has `"universeId": null`).

use serde::{Deserialize, Deserializer, Serialize};

/// One element of the presence lookup's `userPresences` list.
///
/// Only the universe id is read; the other presence fields are ignored so
/// that changes to them can never break decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPresence {
    /// Universe the user is in.
    #[serde(default)]
    pub universe_id: Option<i64>,
}

impl RawPresence {
    /// Returns the universe id if the user is in a game.
    ///
    /// An absent or zero id means "no presence".
    pub fn active_universe(&self) -> Option<i64> {
        self.universe_id.filter(|id| *id != 0)
    }
}

/// Envelope of the presence lookup response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEnvelope {
    /// Presence entries, one per requested user.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_presences: Vec<RawPresence>,
}

/// Creator sub-object of a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCreator {
    /// Creator display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// One element of the catalog lookup's `data` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUniverse {
    /// Universe id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Game name.
    #[serde(default)]
    pub name: Option<String>,
    /// Game description; the catalog returns `null` when unset.
    #[serde(default)]
    pub description: Option<String>,
    /// Creator information.
    #[serde(default)]
    pub creator: Option<RawCreator>,
}

impl RawUniverse {
    /// Returns the creator display name, if present.
    pub fn creator_name(&self) -> Option<&str> {
        self.creator.as_ref().and_then(|c| c.name.as_deref())
    }
}

/// Envelope of the catalog lookup response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogEnvelope {
    /// Catalog entries, one per requested universe.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<RawUniverse>,
}

/// Reads a list that the upstream may send as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
