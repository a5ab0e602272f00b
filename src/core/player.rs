//! Duel sides.
//!
//! ## PlayerId
//!
//! The duel is always two-sided: the acting `Player` and the `Opponent`.
//! The opponent is currently passive (nothing supplies actions for it), but
//! every rule is written against `PlayerId` so the sides stay symmetric.

use serde::{Deserialize, Serialize};

/// One side of a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerId {
    /// The human-controlled side.
    Player,
    /// The passive side.
    Opponent,
}

impl PlayerId {
    /// Both sides, player first.
    pub const ALL: [PlayerId; 2] = [PlayerId::Player, PlayerId::Opponent];

    /// The other side.
    ///
    /// ```
    /// use duel_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::Player.opponent(), PlayerId::Opponent);
    /// assert_eq!(PlayerId::Opponent.opponent(), PlayerId::Player);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerId::Player => PlayerId::Opponent,
            PlayerId::Opponent => PlayerId::Player,
        }
    }

    /// Iterate over both sides.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        Self::ALL.into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::Player => write!(f, "PLAYER"),
            PlayerId::Opponent => write!(f, "OPPONENT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for side in PlayerId::all() {
            assert_ne!(side, side.opponent());
            assert_eq!(side, side.opponent().opponent());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PlayerId::Player), "PLAYER");
        assert_eq!(format!("{}", PlayerId::Opponent), "OPPONENT");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&PlayerId::Opponent).unwrap();
        assert_eq!(json, "\"OPPONENT\"");
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlayerId::Opponent);
    }
}
