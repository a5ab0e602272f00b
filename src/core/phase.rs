//! Turn phases.
//!
//! Phases follow a fixed cycle:
//! `DRAW -> STANDBY -> MAIN1 -> BATTLE -> MAIN2 -> END -> DRAW`.
//! Returning to `DRAW` starts a new turn.

use serde::{Deserialize, Serialize};

/// A phase within a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    Draw,
    Standby,
    #[serde(rename = "MAIN1")]
    Main1,
    Battle,
    #[serde(rename = "MAIN2")]
    Main2,
    End,
}

impl Phase {
    /// All phases in cycle order.
    pub const CYCLE: [Phase; 6] = [
        Phase::Draw,
        Phase::Standby,
        Phase::Main1,
        Phase::Battle,
        Phase::Main2,
        Phase::End,
    ];

    /// The phase that canonically follows this one.
    ///
    /// ```
    /// use duel_engine::core::Phase;
    ///
    /// assert_eq!(Phase::Main1.next(), Phase::Battle);
    /// assert_eq!(Phase::End.next(), Phase::Draw);
    /// ```
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Phase::Draw => Phase::Standby,
            Phase::Standby => Phase::Main1,
            Phase::Main1 => Phase::Battle,
            Phase::Battle => Phase::Main2,
            Phase::Main2 => Phase::End,
            Phase::End => Phase::Draw,
        }
    }

    /// Is `to` the canonical successor of `self`?
    #[must_use]
    pub fn is_canonical_transition(self, to: Phase) -> bool {
        self.next() == to
    }

    /// Is this one of the two main phases?
    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, Phase::Main1 | Phase::Main2)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Draw => "DRAW",
            Phase::Standby => "STANDBY",
            Phase::Main1 => "MAIN1",
            Phase::Battle => "BATTLE",
            Phase::Main2 => "MAIN2",
            Phase::End => "END",
        };
        f.write_str(name)
    }
}
