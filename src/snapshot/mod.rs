//! Export and import of duel snapshots.
//!
//! A snapshot is an opaque serialized `DuelState`. Binary snapshots use
//! bincode (compact, for save slots); JSON snapshots are for debugging and
//! hosts that store documents. Neither format is interpreted by the engine
//! beyond round-tripping.

use crate::core::{DuelError, DuelState};

/// Serialize to a compact binary snapshot.
pub fn to_bytes(state: &DuelState) -> Result<Vec<u8>, DuelError> {
    bincode::serialize(state).map_err(|e| DuelError::Snapshot(e.to_string()))
}

/// Restore from a binary snapshot.
pub fn from_bytes(bytes: &[u8]) -> Result<DuelState, DuelError> {
    bincode::deserialize(bytes).map_err(|e| DuelError::Snapshot(e.to_string()))
}

/// Serialize to a JSON snapshot.
pub fn to_json(state: &DuelState) -> Result<String, DuelError> {
    serde_json::to_string(state).map_err(|e| DuelError::Snapshot(e.to_string()))
}

/// Restore from a JSON snapshot.
pub fn from_json(json: &str) -> Result<DuelState, DuelError> {
    serde_json::from_str(json).map_err(|e| DuelError::Snapshot(e.to_string()))
}
