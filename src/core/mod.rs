//! Core duel types: sides, instance IDs, phases, actions, state, RNG,
//! configuration and errors.
//!
//! Everything here is plain data. Behavior lives in `rules` (what a move
//! does) and `history` (how moves are recorded and rewound).

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, AttackTarget};
pub use config::{DuelConfig, ZONE_SLOTS};
pub use entity::InstanceId;
pub use error::{DeckLoadError, DuelError, ErrorKind, InvariantViolation};
pub use phase::Phase;
pub use player::PlayerId;
pub use rng::GameRng;
pub use state::{Deck, DuelState, PlayerState, ZoneSlots};
