//! PresenceProvider trait and the Roblox implementation.
//!
//! This crate provides the abstraction layer over the two upstream lookups:
//!
//! - [`PresenceProvider`] - The trait the refresher talks to
//! - [`RawPresence`] / [`RawUniverse`] - Typed views of the upstream payloads
//! - [`snapshot_from_universe`] - Conversion into a [`StateSnapshot`]
//! - [`ProviderError`] - Error types for provider operations
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐
//! │  presence API    │    │   games API      │
//! └────────┬─────────┘    └────────┬─────────┘
//!          │                       │
//!          └──────────┬────────────┘
//!                     ▼
//!              ┌──────────────┐
//!              │ RobloxClient │
//!              └──────┬───────┘
//!                     ▼  PresenceProvider
//!        ┌────────────────────────────┐
//!        │ RawPresence / RawUniverse  │
//!        └────────────┬───────────────┘
//!                     ▼ snapshot_from_universe()
//!              ┌───────────────┐
//!              │ StateSnapshot │
//!              └───────────────┘
//! ```
//!
//! [`StateSnapshot`]: rbxpresence_core::StateSnapshot

pub mod error;
pub mod normalize;
pub mod provider;
pub mod raw;
pub mod roblox;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use normalize::snapshot_from_universe;
pub use provider::{BoxFuture, PresenceProvider};
pub use raw::{RawPresence, RawUniverse};
