//! The state record served to local consumers.

use serde::{Deserialize, Serialize};

/// The game the tracked user is currently present in.
///
/// A snapshot is only ever replaced as a whole. The initial value is
/// [`StateSnapshot::default`], which serializes with a zero `id` and empty
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Universe identifier.
    pub id: i64,
    /// Display name of the game.
    pub name: String,
    /// Description text.
    pub description: String,
    /// Display name of the creator.
    pub creator: String,
}

impl StateSnapshot {
    /// Creates a snapshot from its four fields.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        creator: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            creator: creator.into(),
        }
    }

    /// Returns true if this is still the initial, empty snapshot.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
