//! Duel configuration.
//!
//! Hosts configure a duel at startup with `DuelConfig`. Every field has a
//! default matching the standard rules (8000 LP, 5-card opening hand, flat
//! 1000 attack damage, 50-entry history), so `DuelConfig::default()` is a
//! complete configuration. Missing fields fall back to defaults when the
//! config is deserialized.
//!
//! ```
//! use duel_engine::core::DuelConfig;
//!
//! let config = DuelConfig::new()
//!     .with_seed(7)
//!     .with_history_limit(10);
//!
//! assert_eq!(config.starting_lp, 8000);
//! assert_eq!(config.history_limit, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Number of slots in each monster and spell/trap zone.
pub const ZONE_SLOTS: usize = 5;

/// Default starting life points for both sides.
pub const DEFAULT_STARTING_LP: u32 = 8000;

/// Default opening hand size.
pub const DEFAULT_OPENING_HAND: usize = 5;

/// Flat damage dealt by a successful attack.
pub const DEFAULT_ATTACK_DAMAGE: u32 = 1000;

/// Default number of history entries retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Complete duel configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Life points each side starts with.
    pub starting_lp: u32,

    /// Cards dealt from the shuffled deck into the opening hand.
    pub opening_hand_size: usize,

    /// LP lost by the defending side per attack.
    pub attack_damage: u32,

    /// Maximum number of undoable actions kept.
    pub history_limit: usize,

    /// Shuffle seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// End the duel automatically when one side reaches 0 LP.
    pub auto_end_on_lethal: bool,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            starting_lp: DEFAULT_STARTING_LP,
            opening_hand_size: DEFAULT_OPENING_HAND,
            attack_damage: DEFAULT_ATTACK_DAMAGE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            seed: None,
            auto_end_on_lethal: true,
        }
    }
}

impl DuelConfig {
    /// Create a configuration with standard defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set starting life points.
    #[must_use]
    pub fn with_starting_lp(mut self, lp: u32) -> Self {
        self.starting_lp = lp;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    /// Set the flat attack damage.
    #[must_use]
    pub fn with_attack_damage(mut self, damage: u32) -> Self {
        self.attack_damage = damage;
        self
    }

    /// Set the history size limit.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable automatic duel end at 0 LP.
    #[must_use]
    pub fn with_auto_end_on_lethal(mut self, enabled: bool) -> Self {
        self.auto_end_on_lethal = enabled;
        self
    }
}
