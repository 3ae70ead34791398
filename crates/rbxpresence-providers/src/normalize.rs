//! Conversion from upstream catalog entries to [`StateSnapshot`].

use rbxpresence_core::StateSnapshot;

use crate::raw::RawUniverse;

/// Builds a snapshot from exactly the four catalog fields the daemon serves.
///
/// Missing sub-fields become zero or empty strings; they are never an error.
pub fn snapshot_from_universe(universe: &RawUniverse) -> StateSnapshot {
    StateSnapshot::new(
        universe.id.unwrap_or_default(),
        universe.name.clone().unwrap_or_default(),
        universe.description.clone().unwrap_or_default(),
        universe.creator_name().unwrap_or_default(),
    )
}
