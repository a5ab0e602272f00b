//! The transition function.
//!
//! `apply_action` produces the next state from the current one. It assumes
//! the action has already passed `validate_action`; it performs no checks of
//! its own beyond keeping the state well-formed. An action that cannot be
//! carried out (card missing, slot taken) leaves the state as it was.
//!
//! The input is only borrowed. The result is a fresh `DuelState` built from
//! a copy; because card sequences are persistent vectors the copy shares
//! everything the action does not touch.

use crate::cards::{Position, Zone};
use crate::core::config::DEFAULT_ATTACK_DAMAGE;
use crate::core::{Action, AttackTarget, DuelConfig, DuelState, InstanceId, Phase, PlayerId};

/// Apply `action` with the standard flat attack damage.
#[must_use]
pub fn apply_action(state: &DuelState, action: &Action) -> DuelState {
    apply_with_damage(state, action, DEFAULT_ATTACK_DAMAGE)
}

/// Apply `action` using the damage configured in `config`.
#[must_use]
pub fn apply_action_with(state: &DuelState, action: &Action, config: &DuelConfig) -> DuelState {
    apply_with_damage(state, action, config.attack_damage)
}

fn apply_with_damage(state: &DuelState, action: &Action, damage: u32) -> DuelState {
    let mut next = state.clone();
    transition(&mut next, action, damage);
    next
}

fn transition(state: &mut DuelState, action: &Action, damage: u32) {
    match action {
        Action::Draw { player, count } => draw(state, *player, *count),

        Action::NormalSummon { player, card_instance_id, target_zone_index } => {
            if summon_from_hand(state, *player, *card_instance_id, *target_zone_index, Position::FaceUpAttack) {
                state.normal_summon_used_this_turn = true;
            }
        }

        Action::SetMonster { player, card_instance_id, target_zone_index } => {
            summon_from_hand(state, *player, *card_instance_id, *target_zone_index, Position::FaceDownDefense);
        }

        Action::SetSpell { player, card_instance_id, target_zone_index } => {
            set_spell(state, *player, *card_instance_id, *target_zone_index);
        }

        Action::Attack { player, attacker_id, target } => attack(state, *player, *attacker_id, *target, damage),

        Action::ChangePhase { next_phase } => {
            state.phase = *next_phase;
            if *next_phase == Phase::Draw {
                start_turn(state, damage);
            }
        }

        Action::EndDuel { winner } => {
            state.duel_ended = true;
            state.winner = *winner;
        }
    }
}

/// Draw up to `count` cards from the head of the deck.
fn draw(state: &mut DuelState, player: PlayerId, count: u32) {
    let side = state.side_mut(player);
    let available = side.deck.len().min(count as usize);
    for _ in 0..available {
        if let Some(mut card) = side.deck.pop_front() {
            card.place(Zone::Hand, Position::FaceUpAttack);
            side.hand.push_back(card);
        }
    }
}

/// Move a card from hand onto a monster slot. Returns whether it moved.
fn summon_from_hand(
    state: &mut DuelState,
    player: PlayerId,
    id: InstanceId,
    index: usize,
    position: Position,
) -> bool {
    let side = state.side_mut(player);
    let Some(hand_index) = side.hand_index(id) else {
        return false;
    };
    if index >= side.monster_zone.capacity() || side.monster_zone.is_occupied(index) {
        return false;
    }

    let mut card = side.hand.remove(hand_index);
    card.place(Zone::MonsterZone, position);
    match side.monster_zone.place(index, card) {
        Ok(()) => true,
        Err(card) => {
            side.hand.insert(hand_index, card);
            false
        }
    }
}

fn set_spell(state: &mut DuelState, player: PlayerId, id: InstanceId, index: usize) {
    let side = state.side_mut(player);
    let Some(hand_index) = side.hand_index(id) else {
        return;
    };
    if index >= side.spell_trap_zone.capacity() || side.spell_trap_zone.is_occupied(index) {
        return;
    }

    let mut card = side.hand.remove(hand_index);
    card.place(Zone::SpellTrapZone, Position::FaceDownDefense);
    if let Err(card) = side.spell_trap_zone.place(index, card) {
        side.hand.insert(hand_index, card);
    }
}

/// Flat-damage attack. Face-down or missing attackers do nothing.
fn attack(state: &mut DuelState, player: PlayerId, attacker_id: InstanceId, target: AttackTarget, damage: u32) {
    let can_attack = state
        .side(player)
        .monster_zone
        .find(attacker_id)
        .is_some_and(|(_, card)| !card.is_face_down());
    if !can_attack {
        return;
    }

    // The defending monster stays on the field; its owner takes the damage.
    let damaged = match target {
        AttackTarget::Lp => player.opponent(),
        AttackTarget::Card { card_instance_id } => state
            .find_on_field(card_instance_id)
            .map_or(player.opponent(), |defender| defender.owner),
    };

    let side = state.side_mut(damaged);
    side.lp = side.lp.saturating_sub(damage);

    if let Some(attacker) = state.side_mut(player).monster_zone.find_mut(attacker_id) {
        attacker.has_attacked_this_turn = true;
    }
}

/// Bookkeeping on every return to the draw phase.
fn start_turn(state: &mut DuelState, damage: u32) {
    state.normal_summon_used_this_turn = false;
    state.turn_count += 1;
    for player in PlayerId::all() {
        for card in state.side_mut(player).monster_zone.cards_mut() {
            card.has_attacked_this_turn = false;
        }
    }

    // Automatic draw for the acting side only.
    if state.turn_player == PlayerId::Player {
        transition(state, &Action::Draw { player: PlayerId::Player, count: 1 }, damage);
    }
}
