//! Duel actions.
//!
//! `Action` is the closed set of moves a caller can ask the engine to make.
//! Each variant carries exactly the fields it needs; the validator, applier
//! and legal-move query all match on it exhaustively.
//!
//! Actions serialize as internally tagged JSON, which is the format external
//! callers (UI, replays) use:
//!
//! ```
//! use duel_engine::core::{Action, PlayerId};
//!
//! let action: Action = serde_json::from_str(r#"{"type":"DRAW","player":"PLAYER","count":1}"#).unwrap();
//! assert_eq!(action, Action::Draw { player: PlayerId::Player, count: 1 });
//! ```

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::phase::Phase;
use super::player::PlayerId;

/// What an attack is aimed at.
///
/// On the wire this is either the string `"LP"` or a bare
/// `{"cardInstanceId": n}` object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TargetRepr", into = "TargetRepr")]
pub enum AttackTarget {
    /// A direct attack on the opposing side's life points.
    #[default]
    Lp,
    /// An attack on a specific monster.
    Card { card_instance_id: InstanceId },
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum TargetRepr {
    Life(LifePoints),
    #[serde(rename_all = "camelCase")]
    Card { card_instance_id: InstanceId },
}

#[derive(Clone, Copy, Serialize, Deserialize)]
enum LifePoints {
    #[serde(rename = "LP")]
    Lp,
}

impl From<TargetRepr> for AttackTarget {
    fn from(repr: TargetRepr) -> Self {
        match repr {
            TargetRepr::Life(LifePoints::Lp) => AttackTarget::Lp,
            TargetRepr::Card { card_instance_id } => AttackTarget::Card { card_instance_id },
        }
    }
}

impl From<AttackTarget> for TargetRepr {
    fn from(target: AttackTarget) -> Self {
        match target {
            AttackTarget::Lp => TargetRepr::Life(LifePoints::Lp),
            AttackTarget::Card { card_instance_id } => TargetRepr::Card { card_instance_id },
        }
    }
}

/// A move in the duel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum Action {
    /// Draw `count` cards from the head of the deck.
    Draw { player: PlayerId, count: u32 },

    /// Summon a monster from hand face-up in attack position.
    NormalSummon {
        player: PlayerId,
        card_instance_id: InstanceId,
        target_zone_index: usize,
    },

    /// Set a monster from hand face-down in defense position.
    SetMonster {
        player: PlayerId,
        card_instance_id: InstanceId,
        target_zone_index: usize,
    },

    /// Set a spell or trap from hand face-down.
    SetSpell {
        player: PlayerId,
        card_instance_id: InstanceId,
        target_zone_index: usize,
    },

    /// Attack with a monster on the field.
    Attack {
        player: PlayerId,
        attacker_id: InstanceId,
        #[serde(default)]
        target: AttackTarget,
    },

    /// Move to another phase.
    ChangePhase { next_phase: Phase },

    /// End the duel.
    EndDuel { winner: Option<PlayerId> },
}

impl Action {
    /// Stable name of the action kind (matches the serialized tag).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Action::Draw { .. } => "DRAW",
            Action::NormalSummon { .. } => "NORMAL_SUMMON",
            Action::SetMonster { .. } => "SET_MONSTER",
            Action::SetSpell { .. } => "SET_SPELL",
            Action::Attack { .. } => "ATTACK",
            Action::ChangePhase { .. } => "CHANGE_PHASE",
            Action::EndDuel { .. } => "END_DUEL",
        }
    }

    /// The acting side, for actions that have one.
    #[must_use]
    pub const fn player(&self) -> Option<PlayerId> {
        match self {
            Action::Draw { player, .. }
            | Action::NormalSummon { player, .. }
            | Action::SetMonster { player, .. }
            | Action::SetSpell { player, .. }
            | Action::Attack { player, .. } => Some(*player),
            Action::ChangePhase { .. } | Action::EndDuel { .. } => None,
        }
    }

    /// Parse an externally supplied action.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Draw { player, count } => write!(f, "DRAW({player}, {count})"),
            Action::NormalSummon { player, card_instance_id, target_zone_index }
            | Action::SetMonster { player, card_instance_id, target_zone_index }
            | Action::SetSpell { player, card_instance_id, target_zone_index } => {
                write!(f, "{}({player}, {card_instance_id}, slot {target_zone_index})", self.kind())
            }
            Action::Attack { player, attacker_id, target } => match target {
                AttackTarget::Lp => write!(f, "ATTACK({player}, {attacker_id} -> LP)"),
                AttackTarget::Card { card_instance_id } => {
                    write!(f, "ATTACK({player}, {attacker_id} -> {card_instance_id})")
                }
            },
            Action::ChangePhase { next_phase } => write!(f, "CHANGE_PHASE({next_phase})"),
            Action::EndDuel { winner: Some(winner) } => write!(f, "END_DUEL({winner})"),
            Action::EndDuel { winner: None } => write!(f, "END_DUEL(draw)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_player() {
        let summon = Action::NormalSummon {
            player: PlayerId::Player,
            card_instance_id: InstanceId(4),
            target_zone_index: 0,
        };
        assert_eq!(summon.kind(), "NORMAL_SUMMON");
        assert_eq!(summon.player(), Some(PlayerId::Player));

        let phase = Action::ChangePhase { next_phase: Phase::Battle };
        assert_eq!(phase.kind(), "CHANGE_PHASE");
        assert_eq!(phase.player(), None);
    }

    #[test]
    fn test_json_field_names() {
        let action = Action::SetSpell {
            player: PlayerId::Player,
            card_instance_id: InstanceId(9),
            target_zone_index: 2,
        };
        let json = serde_json::to_string(&action).unwrap();

        assert!(json.contains("\"type\":\"SET_SPELL\""));
        assert!(json.contains("\"cardInstanceId\":9"));
        assert!(json.contains("\"targetZoneIndex\":2"));
        assert_eq!(Action::from_json(&json).unwrap(), action);
    }

    #[test]
    fn test_attack_target_defaults_to_lp() {
        let action = Action::from_json(r#"{"type":"ATTACK","player":"PLAYER","attackerId":3}"#).unwrap();

        assert_eq!(
            action,
            Action::Attack {
                player: PlayerId::Player,
                attacker_id: InstanceId(3),
                target: AttackTarget::Lp,
            }
        );
    }

    #[test]
    fn test_attack_card_target() {
        let action = Action::from_json(
            r#"{"type":"ATTACK","player":"PLAYER","attackerId":3,"target":{"cardInstanceId":8}}"#,
        )
        .unwrap();

        match action {
            Action::Attack { target: AttackTarget::Card { card_instance_id }, .. } => {
                assert_eq!(card_instance_id, InstanceId(8));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_attack_target_wire_forms() {
        let lp = Action::from_json(r#"{"type":"ATTACK","player":"PLAYER","attackerId":3,"target":"LP"}"#).unwrap();
        assert!(matches!(lp, Action::Attack { target: AttackTarget::Lp, .. }));

        let card = Action::Attack {
            player: PlayerId::Player,
            attacker_id: InstanceId(3),
            target: AttackTarget::Card { card_instance_id: InstanceId(8) },
        };
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains(r#""target":{"cardInstanceId":8}"#));
        assert_eq!(Action::from_json(&json).unwrap(), card);

        assert_eq!(serde_json::to_string(&AttackTarget::Lp).unwrap(), r#""LP""#);
        assert!(Action::from_json(r#"{"type":"ATTACK","player":"PLAYER","attackerId":3,"target":"ME"}"#).is_err());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(Action::from_json(r#"{"type":"TRIBUTE_SUMMON","player":"PLAYER"}"#).is_err());
        assert!(Action::from_json(r#"{"type":"DRAW","player":"PLAYER"}"#).is_err());
        assert!(Action::from_json("not json").is_err());
    }

    #[test]
    fn test_display() {
        let action = Action::ChangePhase { next_phase: Phase::Main2 };
        assert_eq!(action.to_string(), "CHANGE_PHASE(MAIN2)");
        assert_eq!(Action::EndDuel { winner: None }.to_string(), "END_DUEL(draw)");
    }
}
