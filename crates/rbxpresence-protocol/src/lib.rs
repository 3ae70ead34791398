//! Wire envelope for the rbxpresence state endpoint.
//!
//! Every response body produced by the state server has the shape
//! `{"data": <snapshot>}`. This crate owns that envelope so the server and
//! any consumer agree on it.
//!
//! # Example
//!
//! ```rust
//! use rbxpresence_core::StateSnapshot;
//! use rbxpresence_protocol::{StateEnvelope, decode_envelope, encode_envelope};
//!
//! let envelope = StateEnvelope::new(StateSnapshot::new(123, "Game", "Desc", "Dev"));
//! let bytes = encode_envelope(&envelope).unwrap();
//! let decoded = decode_envelope(&bytes).unwrap();
//! assert_eq!(decoded, envelope);
//! ```

mod error;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use types::{StateEnvelope, decode_envelope, encode_envelope, NULL_ENVELOPE};

/// Content type of every response body.
pub const CONTENT_TYPE: &str = "application/json";
