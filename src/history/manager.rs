//! Bounded undo/redo log of duel snapshots.
//!
//! The manager owns every snapshot it hands out copies of. Its position is a
//! cursor into the log: `-1` (no entry) means the pristine state, otherwise
//! the state after entry `i`.
//!
//! ```text
//! pristine ── a0 ──▶ s0 ── a1 ──▶ s1 ── a2 ──▶ s2
//!    -1               0             1             2   ◀ history_index
//! ```
//!
//! Adding an entry while rewound discards the redo branch. When the log
//! exceeds `max_entries` the oldest entry is evicted and its state becomes
//! the new pristine state, so every entry stays reproducible by replaying
//! the recorded actions from the pristine state.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::config::DEFAULT_HISTORY_LIMIT;
use crate::core::{Action, DuelState};

/// History size limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl HistoryConfig {
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }
}

/// One recorded action and the state it produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: Action,
    /// Snapshot after `action` was applied.
    pub state: DuelState,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(action: Action, state: DuelState) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        Self { action, state, timestamp }
    }
}

/// Undo/redo/seek over a bounded action log.
#[derive(Clone, Debug)]
pub struct HistoryManager {
    initial: DuelState,
    entries: Vector<HistoryEntry>,
    cursor: Option<usize>,
    config: HistoryConfig,
}

impl HistoryManager {
    /// Track a duel starting from `initial`.
    #[must_use]
    pub fn new(initial: DuelState, config: HistoryConfig) -> Self {
        Self {
            initial,
            entries: Vector::new(),
            cursor: None,
            config,
        }
    }

    /// The state at the cursor.
    #[must_use]
    pub fn current(&self) -> &DuelState {
        self.cursor
            .and_then(|i| self.entries.get(i))
            .map_or(&self.initial, |entry| &entry.state)
    }

    /// The pristine state (index `-1`).
    #[must_use]
    pub fn initial_state(&self) -> &DuelState {
        &self.initial
    }

    /// Recorded entries, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<HistoryEntry> {
        &self.entries
    }

    /// Cursor position: `-1` for pristine, else an entry index.
    #[must_use]
    pub fn history_index(&self) -> isize {
        self.cursor.map_or(-1, |i| i as isize)
    }

    #[must_use]
    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.next_index() < self.entries.len()
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |i| i + 1)
    }

    /// Record `action` and the state it produced, making it current.
    pub fn add_history_entry(&mut self, action: Action, state: DuelState) {
        let keep = self.next_index();
        if keep < self.entries.len() {
            log::debug!("discarding {} redo entries", self.entries.len() - keep);
            self.entries.truncate(keep);
        }

        self.entries.push_back(HistoryEntry::new(action, state));
        self.cursor = Some(self.entries.len() - 1);

        while self.entries.len() > self.config.max_entries {
            let Some(evicted) = self.entries.pop_front() else {
                break;
            };
            self.initial = evicted.state;
            self.cursor = self.cursor.and_then(|i| i.checked_sub(1));
        }
    }

    /// Step back one entry. `None` when already at the pristine state.
    pub fn undo(&mut self) -> Option<DuelState> {
        let index = self.cursor?;
        let target = index.checked_sub(1);
        match self.state_at(target) {
            Some(state) => {
                self.cursor = target;
                log::debug!("undo to index {}", self.history_index());
                Some(state)
            }
            None => {
                log::error!(
                    "undo failed: cursor {} points past {} entries",
                    index,
                    self.entries.len()
                );
                None
            }
        }
    }

    /// Step forward one entry. `None` at the end of the log.
    pub fn redo(&mut self) -> Option<DuelState> {
        if !self.can_redo() {
            return None;
        }
        let target = Some(self.next_index());
        match self.state_at(target) {
            Some(state) => {
                self.cursor = target;
                log::debug!("redo to index {}", self.history_index());
                Some(state)
            }
            None => {
                log::error!("redo failed at index {}", self.history_index());
                None
            }
        }
    }

    /// Seek directly to `index` (`-1` for pristine).
    ///
    /// Out-of-range indices leave the cursor where it is and return `None`.
    pub fn jump_to_history(&mut self, index: isize) -> Option<DuelState> {
        let target = match index {
            -1 => None,
            i if i >= 0 && (i as usize) < self.entries.len() => Some(i as usize),
            _ => {
                log::warn!("history index {} out of range (-1..{})", index, self.entries.len());
                return None;
            }
        };
        let state = self.state_at(target)?;
        self.cursor = target;
        log::debug!("jumped to history index {}", index);
        Some(state)
    }

    /// Drop the log and re-anchor on `state`.
    pub fn reset_history(&mut self, state: DuelState) {
        self.entries.clear();
        self.cursor = None;
        self.initial = state;
    }

    /// Replay the log from the pristine state with `apply` and return the
    /// first index whose recorded state differs from the replayed one.
    pub fn first_divergence(&self, apply: impl Fn(&DuelState, &Action) -> DuelState) -> Option<usize> {
        let mut state = self.initial.clone();
        for (i, entry) in self.entries.iter().enumerate() {
            state = apply(&state, &entry.action);
            if state != entry.state {
                return Some(i);
            }
        }
        None
    }

    fn state_at(&self, index: Option<usize>) -> Option<DuelState> {
        match index {
            None => Some(self.initial.clone()),
            Some(i) => self.entries.get(i).map(|entry| entry.state.clone()),
        }
    }
}
