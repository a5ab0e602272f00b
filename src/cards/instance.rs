//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical card token during a duel. It carries no
//! behavior: the rules module moves it between zones and flips its position.
//!
//! The catalog identity (`CardId`) is fixed at creation; `zone`, `position`
//! and `has_attacked_this_turn` change as the duel progresses.

use serde::{Deserialize, Serialize};

use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;

/// Opaque reference into the external card catalog.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a card ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Can this ID be resolved at all? Blank identifiers cannot.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a card currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Zone {
    Hand,
    MonsterZone,
    SpellTrapZone,
    FieldZone,
    Graveyard,
    Deck,
    ExtraDeck,
}

/// Face and battle position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    FaceUpAttack,
    FaceUpDefense,
    FaceDownAttack,
    FaceDownDefense,
}

impl Position {
    #[must_use]
    pub const fn is_face_down(self) -> bool {
        matches!(self, Position::FaceDownAttack | Position::FaceDownDefense)
    }
}

/// A card token in a duel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this token.
    pub instance_id: InstanceId,

    /// Catalog card this token is a copy of.
    pub card_id: CardId,

    /// Side the card belongs to.
    pub owner: PlayerId,

    /// Current zone.
    pub zone: Zone,

    /// Current face/battle position.
    pub position: Position,

    /// Set when the card attacks; cleared at the start of each turn.
    pub has_attacked_this_turn: bool,
}

impl CardInstance {
    /// Create a fresh instance with a newly allocated ID.
    ///
    /// New cards start face-down in the given zone.
    #[must_use]
    pub fn new(card_id: CardId, owner: PlayerId, zone: Zone) -> Self {
        Self::with_id(InstanceId::fresh(), card_id, owner, zone)
    }

    /// Create an instance with an explicit ID.
    #[must_use]
    pub fn with_id(instance_id: InstanceId, card_id: CardId, owner: PlayerId, zone: Zone) -> Self {
        Self {
            instance_id,
            card_id,
            owner,
            zone,
            position: Position::FaceDownDefense,
            has_attacked_this_turn: false,
        }
    }

    /// Move to `zone` in `position`.
    pub fn place(&mut self, zone: Zone, position: Position) {
        self.zone = zone;
        self.position = position;
    }

    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.position.is_face_down()
    }
}
