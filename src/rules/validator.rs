//! Action validation.
//!
//! `validate_action` checks a proposed action against the current state and
//! reports problems as values. It never mutates the state and never panics
//! on an illegal move. Errors block the action; warnings are advisory and
//! the caller decides whether to proceed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Action, AttackTarget, DuelState, InstanceId, Phase, PlayerId, ZONE_SLOTS};

pub const DECK_EMPTY: &str = "Deck is empty";
pub const DRAW_COUNT_ZERO: &str = "Draw count must be at least 1";
pub const ZONE_INDEX_OUT_OF_RANGE: &str = "Zone index out of range";
pub const NORMAL_SUMMON_USED: &str = "Normal Summon already used this turn";
pub const CARD_NOT_IN_HAND: &str = "Card not in hand";
pub const MONSTER_ZONE_OCCUPIED: &str = "Monster zone occupied";
pub const SPELL_TRAP_ZONE_OCCUPIED: &str = "Spell/Trap zone occupied";
pub const NOT_BATTLE_PHASE: &str = "Not in Battle Phase";
pub const ATTACKER_NOT_FOUND: &str = "Attacker not found in monster zone";
pub const ALREADY_ATTACKED: &str = "Monster has already attacked this turn";
pub const ATTACKER_FACE_DOWN: &str = "Face-down monster cannot attack";
pub const TARGET_NOT_FOUND: &str = "Attack target not found on the field";

/// Outcome of validating one action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `false` whenever `errors` is non-empty.
    pub ok: bool,
    pub errors: SmallVec<[String; 2]>,
    pub warnings: SmallVec<[String; 2]>,
}

impl ValidationResult {
    fn from_messages(errors: SmallVec<[String; 2]>, warnings: SmallVec<[String; 2]>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Does `errors` contain `message`?
    #[must_use]
    pub fn has_error(&self, message: &str) -> bool {
        self.errors.iter().any(|e| e == message)
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Validate `action` against `state`.
///
/// ```
/// use duel_engine::core::{Action, Deck, DuelConfig, DuelState, Phase};
/// use duel_engine::rules::validate_action;
///
/// let state = DuelState::new_duel(&Deck::new(["a", "b", "c"]), &DuelConfig::new().with_seed(1)).unwrap();
/// let result = validate_action(&state, &Action::ChangePhase { next_phase: Phase::Battle });
///
/// // Skipping phases is allowed, but flagged.
/// assert!(result.ok);
/// assert_eq!(result.warnings.len(), 1);
/// ```
#[must_use]
pub fn validate_action(state: &DuelState, action: &Action) -> ValidationResult {
    let mut errors = SmallVec::new();
    let mut warnings = SmallVec::new();

    match action {
        Action::Draw { player, count } => {
            if *count == 0 {
                errors.push(DRAW_COUNT_ZERO.to_string());
            }
            if state.side(*player).deck.is_empty() {
                errors.push(DECK_EMPTY.to_string());
            }
        }

        Action::NormalSummon { player, card_instance_id, target_zone_index } => {
            if state.normal_summon_used_this_turn {
                errors.push(NORMAL_SUMMON_USED.to_string());
            }
            check_monster_placement(state, *player, *card_instance_id, *target_zone_index, &mut errors);
        }

        // Setting a monster does not consume the turn's normal summon.
        Action::SetMonster { player, card_instance_id, target_zone_index } => {
            check_monster_placement(state, *player, *card_instance_id, *target_zone_index, &mut errors);
        }

        Action::SetSpell { player, card_instance_id, target_zone_index } => {
            let side = state.side(*player);
            if !side.in_hand(*card_instance_id) {
                errors.push(CARD_NOT_IN_HAND.to_string());
            }
            if *target_zone_index >= ZONE_SLOTS {
                errors.push(ZONE_INDEX_OUT_OF_RANGE.to_string());
            } else if side.spell_trap_zone.is_occupied(*target_zone_index) {
                errors.push(SPELL_TRAP_ZONE_OCCUPIED.to_string());
            }
        }

        Action::Attack { player, attacker_id, target } => {
            if state.phase != Phase::Battle {
                errors.push(NOT_BATTLE_PHASE.to_string());
            }
            match state.side(*player).monster_zone.find(*attacker_id) {
                None => errors.push(ATTACKER_NOT_FOUND.to_string()),
                Some((_, attacker)) => {
                    if attacker.has_attacked_this_turn {
                        errors.push(ALREADY_ATTACKED.to_string());
                    }
                    if attacker.is_face_down() {
                        errors.push(ATTACKER_FACE_DOWN.to_string());
                    }
                }
            }
            if let AttackTarget::Card { card_instance_id } = target {
                let defending = state.side(player.opponent());
                if defending.monster_zone.find(*card_instance_id).is_none() {
                    warnings.push(TARGET_NOT_FOUND.to_string());
                }
            }
        }

        // Out-of-order transitions stay legal so a user can correct a
        // mis-click; they are only flagged.
        Action::ChangePhase { next_phase } => {
            if !state.phase.is_canonical_transition(*next_phase) {
                warnings.push(format!("Unusual phase transition: {} -> {}", state.phase, next_phase));
            }
        }

        Action::EndDuel { .. } => {}
    }

    ValidationResult::from_messages(errors, warnings)
}

fn check_monster_placement(
    state: &DuelState,
    player: PlayerId,
    card: InstanceId,
    index: usize,
    errors: &mut SmallVec<[String; 2]>,
) {
    let side = state.side(player);
    if !side.in_hand(card) {
        errors.push(CARD_NOT_IN_HAND.to_string());
    }
    if index >= ZONE_SLOTS {
        errors.push(ZONE_INDEX_OUT_OF_RANGE.to_string());
    } else if side.monster_zone.is_occupied(index) {
        errors.push(MONSTER_ZONE_OCCUPIED.to_string());
    }
}
