//! Error types.
//!
//! Illegal moves are *not* errors: the validator reports them as values in a
//! `ValidationResult`. The types here cover the remaining failure classes:
//!
//! - deck load failures at duel start (`DeckLoadError`),
//! - broken state invariants detected after a transition (`InvariantViolation`),
//! - orchestration failures surfaced by `DuelSession` (`DuelError`).

use thiserror::Error;

use super::action::Action;
use super::entity::InstanceId;
use super::player::PlayerId;
use crate::cards::Zone;

/// Why a deck could not be turned into a duel.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeckLoadError {
    #[error("deck contains no cards")]
    EmptyDeck,

    #[error("deck entry {index} has no usable card identifier")]
    UnusableCardId { index: usize },
}

/// A state that no sequence of valid actions should produce.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{player} holds {actual} cards but started with {expected}")]
    CardCountChanged {
        player: PlayerId,
        expected: usize,
        actual: usize,
    },

    #[error("{instance} appears more than once")]
    DuplicateInstance { instance: InstanceId },

    #[error("{player} has {instance} which was not in the starting population")]
    UnknownInstance { player: PlayerId, instance: InstanceId },

    #[error("{instance} is stored in {stored:?} but tagged {tagged:?}")]
    ZoneMismatch {
        instance: InstanceId,
        stored: Zone,
        tagged: Zone,
    },

    #[error("{instance} belongs to {owner} but sits on {holder}'s side")]
    OwnerMismatch {
        instance: InstanceId,
        owner: PlayerId,
        holder: PlayerId,
    },

    #[error("turn count must be positive")]
    ZeroTurnCount,
}

/// Coarse classification used for logging and recovery decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The deck could not be loaded.
    DeckLoadFailed,
    /// The input could not be parsed as an action.
    Malformed,
    /// The action was illegal (validator errors or duel already over).
    Rejected,
    /// An action failed mid-flight; the previous state was restored.
    Recoverable,
    /// The tracked state is itself corrupt; the duel cannot continue.
    Fatal,
}

/// Errors surfaced by the session orchestrator.
#[derive(Debug, Error)]
pub enum DuelError {
    #[error("deck load failed: {0}")]
    DeckLoad(#[from] DeckLoadError),

    #[error("malformed action: {0}")]
    MalformedAction(#[source] serde_json::Error),

    #[error("action {action} rejected: {}", .errors.join("; "))]
    Rejected { action: Action, errors: Vec<String> },

    #[error("the duel has already ended")]
    DuelEnded,

    #[error("action {action} failed: {reason}")]
    ActionFailed {
        action: Action,
        reason: String,
        kind: ErrorKind,
    },

    #[error("snapshot failed: {0}")]
    Snapshot(String),
}

impl DuelError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            DuelError::DeckLoad(_) => ErrorKind::DeckLoadFailed,
            DuelError::MalformedAction(_) | DuelError::Snapshot(_) => ErrorKind::Malformed,
            DuelError::Rejected { .. } | DuelError::DuelEnded => ErrorKind::Rejected,
            DuelError::ActionFailed { kind, .. } => *kind,
        }
    }

    /// Can the duel continue after this error?
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::Fatal
    }
}
