//! Legal-move menu.
//!
//! `available_actions` lists the actions a UI should offer for the current
//! state, optionally focused on one card. Entries are ready-to-dispatch
//! `Action`s paired with a translation key for the button label. An entry
//! may be listed but disabled, with the reason the validator would give.

use serde::{Deserialize, Serialize};

use super::validator::NORMAL_SUMMON_USED;
use crate::cards::Zone;
use crate::core::{Action, AttackTarget, DuelState, InstanceId, Phase, PlayerId};

pub const LABEL_CHANGE_PHASE: &str = "duel.action.change_phase";
pub const LABEL_DRAW: &str = "duel.action.draw";
pub const LABEL_NORMAL_SUMMON: &str = "duel.action.normal_summon";
pub const LABEL_SET_MONSTER: &str = "duel.action.set_monster";
pub const LABEL_SET_SPELL: &str = "duel.action.set_spell";
pub const LABEL_ATTACK: &str = "duel.action.attack";

/// One entry in the legal-move menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableAction {
    pub action: Action,
    /// Translation key for the label.
    pub label_key: String,
    pub disabled: bool,
    /// Why the entry is disabled.
    pub reason: Option<String>,
}

impl AvailableAction {
    fn enabled(action: Action, label_key: &str) -> Self {
        Self {
            action,
            label_key: label_key.to_string(),
            disabled: false,
            reason: None,
        }
    }

    fn disabled(action: Action, label_key: &str, reason: &str) -> Self {
        Self {
            action,
            label_key: label_key.to_string(),
            disabled: true,
            reason: Some(reason.to_string()),
        }
    }
}

/// List the actions to offer in `state`, optionally for one focused card.
///
/// The phase advance is always offered. On the opponent's turn nothing else
/// is, since the opponent side does not act.
#[must_use]
pub fn available_actions(state: &DuelState, focus: Option<InstanceId>) -> Vec<AvailableAction> {
    let mut actions = vec![AvailableAction::enabled(
        Action::ChangePhase { next_phase: state.phase.next() },
        LABEL_CHANGE_PHASE,
    )];

    if state.turn_player != PlayerId::Player {
        return actions;
    }
    let side = &state.player;

    let Some(focus) = focus else {
        if state.phase == Phase::Draw && !side.deck.is_empty() {
            actions.push(AvailableAction::enabled(
                Action::Draw { player: PlayerId::Player, count: 1 },
                LABEL_DRAW,
            ));
        }
        return actions;
    };

    if side.in_hand(focus) {
        hand_actions(state, focus, &mut actions);
    } else if let Some((_, card)) = side.monster_zone.find(focus) {
        if state.phase == Phase::Battle && !card.has_attacked_this_turn && !card.is_face_down() {
            actions.push(AvailableAction::enabled(
                Action::Attack {
                    player: PlayerId::Player,
                    attacker_id: card.instance_id,
                    target: AttackTarget::Lp,
                },
                LABEL_ATTACK,
            ));
        }
    }

    actions
}

fn hand_actions(state: &DuelState, card: InstanceId, actions: &mut Vec<AvailableAction>) {
    let side = &state.player;

    if state.phase == Phase::Main1 {
        if let Some(slot) = side.monster_zone.first_open() {
            let summon = Action::NormalSummon {
                player: PlayerId::Player,
                card_instance_id: card,
                target_zone_index: slot,
            };
            actions.push(if state.normal_summon_used_this_turn {
                AvailableAction::disabled(summon, LABEL_NORMAL_SUMMON, NORMAL_SUMMON_USED)
            } else {
                AvailableAction::enabled(summon, LABEL_NORMAL_SUMMON)
            });
            actions.push(AvailableAction::enabled(
                Action::SetMonster {
                    player: PlayerId::Player,
                    card_instance_id: card,
                    target_zone_index: slot,
                },
                LABEL_SET_MONSTER,
            ));
        }
    }

    if state.phase.is_main() {
        if let Some(slot) = side.spell_trap_zone.first_open() {
            actions.push(AvailableAction::enabled(
                Action::SetSpell {
                    player: PlayerId::Player,
                    card_instance_id: card,
                    target_zone_index: slot,
                },
                LABEL_SET_SPELL,
            ));
        }
    }
}

/// Does the menu for `focus` include an entry with this label?
#[must_use]
pub fn offers(state: &DuelState, focus: Option<InstanceId>, label_key: &str) -> bool {
    available_actions(state, focus).iter().any(|a| a.label_key == label_key)
}

/// Where the focused card sits, for callers deciding which menu to open.
#[must_use]
pub fn focus_zone(state: &DuelState, focus: InstanceId) -> Option<Zone> {
    state
        .player
        .cards_by_zone()
        .find(|(_, card)| card.instance_id == focus)
        .map(|(zone, _)| zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Deck, DuelConfig};
    use crate::rules::{apply_action, validate_action};

    fn state() -> DuelState {
        DuelState::new_duel(&Deck::new((0..20).map(|i| i.to_string())), &DuelConfig::new().with_seed(2)).unwrap()
    }

    fn to_phase(state: &DuelState, phase: Phase) -> DuelState {
        apply_action(state, &Action::ChangePhase { next_phase: phase })
    }

    fn labels(actions: &[AvailableAction]) -> Vec<&str> {
        actions.iter().map(|a| a.label_key.as_str()).collect()
    }

    #[test]
    fn test_draw_phase_without_focus() {
        let s = state();
        let actions = available_actions(&s, None);

        assert_eq!(labels(&actions), vec![LABEL_CHANGE_PHASE, LABEL_DRAW]);
        assert_eq!(actions[0].action, Action::ChangePhase { next_phase: Phase::Standby });
    }

    #[test]
    fn test_no_draw_with_empty_deck() {
        let mut s = state();
        s.player.deck.clear();

        assert_eq!(labels(&available_actions(&s, None)), vec![LABEL_CHANGE_PHASE]);
    }

    #[test]
    fn test_opponent_turn_only_phase_change() {
        let mut s = to_phase(&state(), Phase::Main1);
        s.turn_player = PlayerId::Opponent;
        let focus = s.player.hand[0].instance_id;

        let actions = available_actions(&s, Some(focus));
        assert_eq!(labels(&actions), vec![LABEL_CHANGE_PHASE]);
    }

    #[test]
    fn test_hand_card_in_main1() {
        let s = to_phase(&state(), Phase::Main1);
        let focus = s.player.hand[0].instance_id;

        let actions = available_actions(&s, Some(focus));

        assert_eq!(
            labels(&actions),
            vec![LABEL_CHANGE_PHASE, LABEL_NORMAL_SUMMON, LABEL_SET_MONSTER, LABEL_SET_SPELL]
        );
        assert!(actions.iter().all(|a| !a.disabled));
        for entry in &actions {
            assert!(validate_action(&s, &entry.action).ok, "{:?} should validate", entry.action);
        }
    }

    #[test]
    fn test_normal_summon_disabled_after_use() {
        let s = to_phase(&state(), Phase::Main1);
        let first = s.player.hand[0].instance_id;
        let s = apply_action(
            &s,
            &Action::NormalSummon { player: PlayerId::Player, card_instance_id: first, target_zone_index: 0 },
        );
        let focus = s.player.hand[0].instance_id;

        let actions = available_actions(&s, Some(focus));
        let summon = actions.iter().find(|a| a.label_key == LABEL_NORMAL_SUMMON).unwrap();

        assert!(summon.disabled);
        assert_eq!(summon.reason.as_deref(), Some(NORMAL_SUMMON_USED));
        assert_eq!(
            summon.action,
            Action::NormalSummon { player: PlayerId::Player, card_instance_id: focus, target_zone_index: 1 }
        );
        assert!(offers(&s, Some(focus), LABEL_SET_MONSTER));
    }

    #[test]
    fn test_hand_card_outside_main1() {
        let s = state();
        let focus = s.player.hand[0].instance_id;
        assert_eq!(labels(&available_actions(&s, Some(focus))), vec![LABEL_CHANGE_PHASE]);

        let s = to_phase(&s, Phase::Main2);
        assert_eq!(
            labels(&available_actions(&s, Some(focus))),
            vec![LABEL_CHANGE_PHASE, LABEL_SET_SPELL]
        );
    }

    #[test]
    fn test_monster_attack_in_battle() {
        let s = to_phase(&state(), Phase::Main1);
        let id = s.player.hand[0].instance_id;
        let s = apply_action(
            &s,
            &Action::NormalSummon { player: PlayerId::Player, card_instance_id: id, target_zone_index: 0 },
        );
        assert!(!offers(&s, Some(id), LABEL_ATTACK));

        let s = to_phase(&s, Phase::Battle);
        assert!(offers(&s, Some(id), LABEL_ATTACK));
        assert_eq!(focus_zone(&s, id), Some(Zone::MonsterZone));

        let s = apply_action(
            &s,
            &Action::Attack { player: PlayerId::Player, attacker_id: id, target: AttackTarget::Lp },
        );
        assert!(!offers(&s, Some(id), LABEL_ATTACK));
    }

    #[test]
    fn test_face_down_monster_cannot_attack() {
        let s = to_phase(&state(), Phase::Main1);
        let id = s.player.hand[0].instance_id;
        let s = apply_action(
            &s,
            &Action::SetMonster { player: PlayerId::Player, card_instance_id: id, target_zone_index: 0 },
        );
        let s = to_phase(&s, Phase::Battle);

        assert!(!offers(&s, Some(id), LABEL_ATTACK));
    }

    #[test]
    fn test_full_monster_zone_hides_summons() {
        let mut s = to_phase(&state(), Phase::Main1);
        for slot in 0..5 {
            let id = s.player.hand[0].instance_id;
            s = apply_action(
                &s,
                &Action::SetMonster { player: PlayerId::Player, card_instance_id: id, target_zone_index: slot },
            );
        }
        s = apply_action(&s, &Action::Draw { player: PlayerId::Player, count: 1 });
        let focus = s.player.hand[0].instance_id;

        let actions = available_actions(&s, Some(focus));
        let found = labels(&actions);
        assert!(!found.contains(&LABEL_NORMAL_SUMMON));
        assert!(!found.contains(&LABEL_SET_MONSTER));
        assert!(found.contains(&LABEL_SET_SPELL));
    }
}
