//! Duel rules.
//!
//! Three pure functions over `DuelState`, all matching exhaustively on
//! `Action`:
//!
//! - `validate_action`: is a move legal here? (errors block, warnings advise)
//! - `apply_action`: the next state after a move
//! - `available_actions`: the moves a UI should offer
//!
//! plus `invariants`, the checks every reachable state satisfies.
//!
//! None of these mutate their input or log; orchestration belongs to
//! `session`.

pub mod applier;
pub mod available;
pub mod invariants;
pub mod validator;

pub use applier::{apply_action, apply_action_with};
pub use available::{available_actions, AvailableAction};
pub use invariants::{check_invariants, check_population, duel_outcome};
pub use validator::{validate_action, ValidationResult};
