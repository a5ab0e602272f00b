//! Undo/redo/replay over the duel's action log.
//!
//! `HistoryManager` records each applied action with the snapshot it
//! produced. It does not know how actions are validated or applied; the
//! session feeds it results.

pub mod manager;

pub use manager::{HistoryConfig, HistoryEntry, HistoryManager};
