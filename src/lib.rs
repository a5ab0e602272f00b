//! # duel-engine
//!
//! Rules engine for a single-player trading-card duel: the card and state
//! model, move validation, state transitions, the legal-move menu and an
//! undo/redo history.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: `validate_action`, `apply_action` and
//!    `available_actions` never mutate their input. Every transition
//!    returns a new `DuelState`.
//!
//! 2. **Closed Action Set**: `Action` is an enum, so every rule function
//!    handles every kind of move or fails to compile.
//!
//! 3. **Illegal Is Not Exceptional**: rejected moves are reported as
//!    `ValidationResult` values. Errors are reserved for deck load
//!    failures, malformed input and faults.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: card sequences and the history log use
//!   `im-rs`, so snapshots for history share structure.
//!
//! - **Deterministic Shuffle**: ChaCha8 seeded from `DuelConfig::seed`.
//!
//! ## Modules
//!
//! - `core`: Sides, instance IDs, phases, actions, state, RNG, configuration, errors
//! - `cards`: Card instances, zones, positions and the catalog boundary
//! - `rules`: Validator, applier, legal-move query, invariants
//! - `history`: Bounded undo/redo log
//! - `session`: Orchestration of dispatch, recovery and history
//! - `snapshot`: Binary and JSON state export

pub mod core;
pub mod cards;
pub mod rules;
pub mod history;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    Action, AttackTarget,
    Deck, DuelConfig, DuelState, PlayerState, ZoneSlots,
    DeckLoadError, DuelError, ErrorKind, InvariantViolation,
    GameRng,
    InstanceId, Phase, PlayerId,
};

pub use crate::cards::{CardCatalog, CardData, CardId, CardInstance, InMemoryCatalog, Position, Zone};

pub use crate::rules::{
    apply_action, apply_action_with, available_actions, validate_action,
    check_invariants, duel_outcome,
    AvailableAction, ValidationResult,
};

pub use crate::history::{HistoryConfig, HistoryEntry, HistoryManager};

pub use crate::session::{DispatchReport, DuelSession};
