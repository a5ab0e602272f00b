//! Duel orchestration.
//!
//! `DuelSession` is the single entry point that changes a duel: it runs the
//! validator, applies the action, checks the result against the state
//! invariants, records it in history and ends the duel when a side runs out
//! of life points. Faults are contained here so the pure rule functions
//! never need to handle them.

pub mod duel;

pub use duel::{DispatchReport, DuelSession};
