//! State invariants and duel outcome.
//!
//! These checks describe what every reachable state looks like. The session
//! runs them after each transition to catch faults before a bad state is
//! committed; tests use them as property oracles.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::cards::CardId;
use crate::core::{DuelState, InstanceId, InvariantViolation, PlayerId};

/// Check the structural invariants of a single state.
///
/// - Each side holds exactly as many cards as it started with.
/// - No instance appears twice.
/// - Each card's `zone` tag matches the container it is stored in, and it
///   sits on its owner's side.
/// - The turn counter is positive.
///
/// Slot capacity and non-negative LP are guaranteed by the types.
pub fn check_invariants(state: &DuelState) -> Result<(), InvariantViolation> {
    if state.turn_count == 0 {
        return Err(InvariantViolation::ZeroTurnCount);
    }

    let mut seen = FxHashSet::default();
    for player in PlayerId::all() {
        let side = state.side(player);

        let expected = state.original_card_count(player);
        let actual = side.card_count();
        if actual != expected {
            return Err(InvariantViolation::CardCountChanged { player, expected, actual });
        }

        for (stored, card) in side.cards_by_zone() {
            if !seen.insert(card.instance_id) {
                return Err(InvariantViolation::DuplicateInstance { instance: card.instance_id });
            }
            if card.zone != stored {
                return Err(InvariantViolation::ZoneMismatch {
                    instance: card.instance_id,
                    stored,
                    tagged: card.zone,
                });
            }
            if card.owner != player {
                return Err(InvariantViolation::OwnerMismatch {
                    instance: card.instance_id,
                    owner: card.owner,
                    holder: player,
                });
            }
        }
    }

    Ok(())
}

/// Check that `state` holds exactly the cards `origin` held: the same
/// instance IDs, each still a copy of the same catalog card.
pub fn check_population(state: &DuelState, origin: &DuelState) -> Result<(), InvariantViolation> {
    for player in PlayerId::all() {
        let original: FxHashMap<InstanceId, &CardId> = origin
            .side(player)
            .cards_by_zone()
            .map(|(_, card)| (card.instance_id, &card.card_id))
            .collect();

        let side = state.side(player);
        let actual = side.card_count();
        if actual != original.len() {
            return Err(InvariantViolation::CardCountChanged {
                player,
                expected: original.len(),
                actual,
            });
        }

        for (_, card) in side.cards_by_zone() {
            if original.get(&card.instance_id) != Some(&&card.card_id) {
                return Err(InvariantViolation::UnknownInstance { player, instance: card.instance_id });
            }
        }
    }

    Ok(())
}

/// The winner implied by life points, if exactly one side is at 0.
///
/// Both sides at 0 is a draw and yields `None`, as does a duel still in
/// progress.
#[must_use]
pub fn duel_outcome(state: &DuelState) -> Option<PlayerId> {
    match (state.player.lp, state.opponent.lp) {
        (0, 0) => None,
        (_, 0) => Some(PlayerId::Player),
        (0, _) => Some(PlayerId::Opponent),
        _ => None,
    }
}
