//! The `{"data": ...}` envelope.

use rbxpresence_core::StateSnapshot;
use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};

/// Body served when the snapshot cannot be encoded.
pub const NULL_ENVELOPE: &[u8] = br#"{"data":null}"#;

/// Response body wrapping the current snapshot under a single `data` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEnvelope {
    /// The snapshot held at the instant of serialization.
    pub data: Option<StateSnapshot>,
}

impl StateEnvelope {
    /// Wraps a snapshot.
    pub fn new(snapshot: StateSnapshot) -> Self {
        Self {
            data: Some(snapshot),
        }
    }

    /// An envelope carrying `null`.
    pub fn empty() -> Self {
        Self { data: None }
    }

    /// Returns the wrapped snapshot, if any.
    pub fn snapshot(&self) -> Option<&StateSnapshot> {
        self.data.as_ref()
    }
}

impl From<StateSnapshot> for StateEnvelope {
    fn from(snapshot: StateSnapshot) -> Self {
        Self::new(snapshot)
    }
}

/// Encodes an envelope as a compact JSON body.
pub fn encode_envelope(envelope: &StateEnvelope) -> ProtocolResult<Vec<u8>> {
    Ok(serde_json::to_vec(envelope)?)
}

/// Decodes a JSON body into an envelope.
pub fn decode_envelope(bytes: &[u8]) -> ProtocolResult<StateEnvelope> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ProtocolError::EmptyBody);
    }
    Ok(serde_json::from_slice(bytes)?)
}
