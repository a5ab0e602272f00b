use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::core::{Action, Deck, DuelConfig, DuelError, DuelState, ErrorKind, InstanceId, PlayerId};
use crate::history::{HistoryConfig, HistoryEntry, HistoryManager};
use crate::rules::{
    apply_action_with, available_actions, check_invariants, check_population, duel_outcome,
    validate_action, AvailableAction, ValidationResult,
};
use crate::snapshot;

/// What a successful dispatch produced besides the new state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Validator warnings for the dispatched action.
    pub warnings: Vec<String>,
    /// An `END_DUEL` was recorded after the action brought a side to 0 LP.
    pub auto_ended: bool,
}

/// A running duel: the current state, its history and the rules that
/// move it forward.
///
/// Every state change goes through `dispatch`, which validates, applies,
/// checks the result and records it. Rejected or faulty actions never
/// touch the tracked state.
#[derive(Clone, Debug)]
pub struct DuelSession {
    history: HistoryManager,
    config: DuelConfig,
}

impl DuelSession {
    /// Start a new duel from `deck`.
    ///
    /// ```
    /// use duel_engine::core::{Action, Deck, DuelConfig, Phase};
    /// use duel_engine::session::DuelSession;
    ///
    /// let deck = Deck::new((0..20).map(|i| format!("card-{i}")));
    /// let mut session = DuelSession::start(&deck, DuelConfig::new().with_seed(9)).unwrap();
    ///
    /// session.dispatch(Action::ChangePhase { next_phase: Phase::Standby }).unwrap();
    /// assert_eq!(session.current().phase, Phase::Standby);
    /// assert!(session.can_undo());
    /// ```
    pub fn start(deck: &Deck, config: DuelConfig) -> Result<Self, DuelError> {
        let state = DuelState::new_duel(deck, &config)?;
        log::info!(
            "duel started: {} cards, {} LP, seed {:?}",
            deck.len(),
            config.starting_lp,
            config.seed
        );
        Ok(Self::from_state(state, config))
    }

    /// Resume from an existing state with an empty history.
    #[must_use]
    pub fn from_state(state: DuelState, config: DuelConfig) -> Self {
        let history = HistoryManager::new(state, HistoryConfig::new(config.history_limit));
        Self { history, config }
    }

    /// Throw away the current duel and start over with `deck`.
    pub fn restart(&mut self, deck: &Deck) -> Result<(), DuelError> {
        let state = DuelState::new_duel(deck, &self.config)?;
        self.history.reset_history(state);
        log::info!("duel restarted with {} cards", deck.len());
        Ok(())
    }

    #[must_use]
    pub fn current(&self) -> &DuelState {
        self.history.current()
    }

    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.current().duel_ended
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.current().winner
    }

    /// Check `action` against the current state without applying it.
    #[must_use]
    pub fn validate(&self, action: &Action) -> ValidationResult {
        validate_action(self.current(), action)
    }

    /// The legal-move menu for the current state.
    #[must_use]
    pub fn available_actions(&self, focus: Option<InstanceId>) -> Vec<AvailableAction> {
        available_actions(self.current(), focus)
    }

    /// Validate, apply and record `action`.
    ///
    /// When the action leaves exactly one side at 0 LP and
    /// `auto_end_on_lethal` is set, an `END_DUEL` naming the winner is
    /// dispatched and recorded right after it.
    pub fn dispatch(&mut self, action: Action) -> Result<DispatchReport, DuelError> {
        let warnings = self.commit(action)?;

        let mut report = DispatchReport { warnings, auto_ended: false };
        if self.config.auto_end_on_lethal && !self.is_over() {
            if let Some(winner) = duel_outcome(self.current()) {
                log::info!("{} reached 0 LP, {} wins", winner.opponent(), winner);
                self.commit(Action::EndDuel { winner: Some(winner) })?;
                report.auto_ended = true;
            }
        }
        Ok(report)
    }

    /// Parse an action from its JSON form and dispatch it.
    pub fn dispatch_json(&mut self, json: &str) -> Result<DispatchReport, DuelError> {
        let action = Action::from_json(json).map_err(|e| {
            log::warn!("malformed action: {}", e);
            DuelError::MalformedAction(e)
        })?;
        self.dispatch(action)
    }

    fn commit(&mut self, action: Action) -> Result<Vec<String>, DuelError> {
        let before = self.current();
        if before.duel_ended {
            log::warn!("{} dispatched after the duel ended", action);
            return Err(DuelError::DuelEnded);
        }

        let validation = validate_action(before, &action);
        if !validation.ok {
            log::warn!("{} rejected: {}", action, validation.errors.join("; "));
            return Err(DuelError::Rejected {
                action,
                errors: validation.errors.into_vec(),
            });
        }
        for warning in &validation.warnings {
            log::warn!("{}: {}", action, warning);
        }

        log::debug!(
            "applying {} on turn {} ({})",
            action,
            before.turn_count,
            before.phase
        );
        let next = self.apply_checked(&action)?;
        self.history.add_history_entry(action, next);

        Ok(validation.warnings.into_vec())
    }

    /// Apply `action` to the current state and verify the result.
    fn apply_checked(&mut self, action: &Action) -> Result<DuelState, DuelError> {
        let before = self.current();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| apply_action_with(before, action, &self.config)));

        let fault = match outcome {
            Ok(next) => match check_invariants(&next)
                .and_then(|()| check_population(&next, self.history.initial_state()))
            {
                Ok(()) => return Ok(next),
                Err(violation) => violation.to_string(),
            },
            Err(payload) => panic_message(payload.as_ref()),
        };

        Err(self.recover(action, fault))
    }

    /// Log a fault and roll back if the tracked state is itself bad.
    fn recover(&mut self, action: &Action, reason: String) -> DuelError {
        let state = self.current();
        log::error!(
            "{} failed on turn {} ({}), history index {}: {}",
            action,
            state.turn_count,
            state.phase,
            self.history.history_index(),
            reason
        );

        let kind = if check_invariants(state).is_ok() {
            ErrorKind::Recoverable
        } else {
            match self.history.undo() {
                Some(previous) if check_invariants(&previous).is_ok() => {
                    log::warn!("rolled back to history index {}", self.history.history_index());
                    ErrorKind::Recoverable
                }
                _ => {
                    log::error!("no consistent state to roll back to");
                    ErrorKind::Fatal
                }
            }
        };

        DuelError::ActionFailed {
            action: action.clone(),
            reason,
            kind,
        }
    }

    pub fn undo(&mut self) -> Option<DuelState> {
        self.history.undo()
    }

    pub fn redo(&mut self) -> Option<DuelState> {
        self.history.redo()
    }

    /// Seek to a history index (`-1` for the pristine state).
    pub fn jump_to(&mut self, index: isize) -> Option<DuelState> {
        self.history.jump_to_history(index)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn history(&self) -> &im::Vector<HistoryEntry> {
        self.history.history()
    }

    #[must_use]
    pub fn history_index(&self) -> isize {
        self.history.history_index()
    }

    /// Replay the recorded actions from the pristine state and return the
    /// first entry whose recorded state does not match.
    #[must_use]
    pub fn verify_history(&self) -> Option<usize> {
        self.history
            .first_divergence(|state, action| apply_action_with(state, action, &self.config))
    }

    /// Serialize the current state.
    pub fn export_snapshot(&self) -> Result<Vec<u8>, DuelError> {
        snapshot::to_bytes(self.current())
    }

    /// Replace the duel with a snapshot, clearing history.
    ///
    /// The snapshot must satisfy the state invariants.
    pub fn import_snapshot(&mut self, bytes: &[u8]) -> Result<(), DuelError> {
        let state = snapshot::from_bytes(bytes)?;
        check_invariants(&state).map_err(|violation| DuelError::Snapshot(violation.to_string()))?;
        self.history.reset_history(state);
        log::info!("snapshot imported");
        Ok(())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "action handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AttackTarget, Phase};
    use crate::rules::validator::{NORMAL_SUMMON_USED, NOT_BATTLE_PHASE};

    fn deck(n: usize) -> Deck {
        Deck::new((0..n).map(|i| format!("c{i}")))
    }

    fn session(config: DuelConfig) -> DuelSession {
        DuelSession::start(&deck(20), config.with_seed(11)).unwrap()
    }

    fn phase(session: &mut DuelSession, next_phase: Phase) {
        session.dispatch(Action::ChangePhase { next_phase }).unwrap();
    }

    fn summon_first(session: &mut DuelSession, slot: usize) -> InstanceId {
        let id = session.current().player.hand[0].instance_id;
        session
            .dispatch(Action::NormalSummon {
                player: PlayerId::Player,
                card_instance_id: id,
                target_zone_index: slot,
            })
            .unwrap();
        id
    }

    #[test]
    fn test_start_rejects_empty_deck() {
        let err = DuelSession::start(&Deck::default(), DuelConfig::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeckLoadFailed);
    }

    #[test]
    fn test_dispatch_records_history() {
        let mut s = session(DuelConfig::new());
        phase(&mut s, Phase::Main1);
        summon_first(&mut s, 0);

        assert_eq!(s.history().len(), 2);
        assert_eq!(s.history_index(), 1);
        assert_eq!(s.current().player.monster_zone.occupied_count(), 1);
        assert_eq!(s.verify_history(), None);
    }

    #[test]
    fn test_rejected_action_leaves_state() {
        let mut s = session(DuelConfig::new());
        phase(&mut s, Phase::Main1);
        summon_first(&mut s, 0);
        let before = s.current().clone();

        let id = before.player.hand[0].instance_id;
        let err = s
            .dispatch(Action::NormalSummon {
                player: PlayerId::Player,
                card_instance_id: id,
                target_zone_index: 1,
            })
            .unwrap_err();

        match err {
            DuelError::Rejected { errors, .. } => assert_eq!(errors, vec![NORMAL_SUMMON_USED.to_string()]),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(s.current(), &before);
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn test_warnings_are_reported() {
        let mut s = session(DuelConfig::new());
        let report = s.dispatch(Action::ChangePhase { next_phase: Phase::Battle }).unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(!report.auto_ended);
        assert_eq!(s.current().phase, Phase::Battle);
    }

    #[test]
    fn test_lethal_attack_ends_duel() {
        let mut s = session(DuelConfig::new().with_starting_lp(1000));
        phase(&mut s, Phase::Main1);
        let id = summon_first(&mut s, 0);
        phase(&mut s, Phase::Battle);

        let report = s
            .dispatch(Action::Attack { player: PlayerId::Player, attacker_id: id, target: AttackTarget::Lp })
            .unwrap();

        assert!(report.auto_ended);
        assert!(s.is_over());
        assert_eq!(s.winner(), Some(PlayerId::Player));
        assert_eq!(
            s.history().last().map(|e| e.action.clone()),
            Some(Action::EndDuel { winner: Some(PlayerId::Player) })
        );
        assert_eq!(s.verify_history(), None);

        let err = s.dispatch(Action::ChangePhase { next_phase: Phase::Main2 }).unwrap_err();
        assert!(matches!(err, DuelError::DuelEnded));
    }

    #[test]
    fn test_lethal_without_auto_end() {
        let mut s = session(DuelConfig::new().with_starting_lp(1000).with_auto_end_on_lethal(false));
        phase(&mut s, Phase::Main1);
        let id = summon_first(&mut s, 0);
        phase(&mut s, Phase::Battle);

        let report = s
            .dispatch(Action::Attack { player: PlayerId::Player, attacker_id: id, target: AttackTarget::Lp })
            .unwrap();

        assert!(!report.auto_ended);
        assert!(!s.is_over());
        assert_eq!(s.current().opponent.lp, 0);
    }

    #[test]
    fn test_undo_then_dispatch_truncates() {
        let mut s = session(DuelConfig::new());
        phase(&mut s, Phase::Standby);
        phase(&mut s, Phase::Main1);
        s.undo();
        assert!(s.can_redo());

        phase(&mut s, Phase::Battle);
        assert!(!s.can_redo());
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.current().phase, Phase::Battle);
    }

    #[test]
    fn test_dispatch_json() {
        let mut s = session(DuelConfig::new());
        s.dispatch_json(r#"{"type":"CHANGE_PHASE","nextPhase":"STANDBY"}"#).unwrap();
        assert_eq!(s.current().phase, Phase::Standby);

        let err = s.dispatch_json(r#"{"type":"FLY"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err = s.dispatch_json(r#"{"type":"ATTACK","player":"PLAYER","attackerId":1}"#).unwrap_err();
        match err {
            DuelError::Rejected { errors, .. } => assert!(errors.contains(&NOT_BATTLE_PHASE.to_string())),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_history_limit_from_config() {
        let mut s = session(DuelConfig::new().with_history_limit(3));
        for next_phase in [Phase::Standby, Phase::Main1, Phase::Battle, Phase::Main2, Phase::End] {
            phase(&mut s, next_phase);
        }

        assert_eq!(s.history().len(), 3);
        assert_eq!(s.verify_history(), None);
        while s.undo().is_some() {}
        assert_eq!(s.current().phase, Phase::Main1);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut s = session(DuelConfig::new());
        phase(&mut s, Phase::Main1);
        summon_first(&mut s, 2);
        let bytes = s.export_snapshot().unwrap();
        let saved = s.current().clone();

        s.restart(&deck(10)).unwrap();
        assert_eq!(s.current().player.card_count(), 10);
        assert!(!s.can_undo());

        s.import_snapshot(&bytes).unwrap();
        assert_eq!(s.current(), &saved);
        assert!(!s.can_undo());
    }

    #[test]
    fn test_import_rejects_corrupt_state() {
        let mut s = session(DuelConfig::new());
        let mut bad = s.current().clone();
        bad.player.deck.pop_front();
        let bytes = snapshot::to_bytes(&bad).unwrap();

        let err = s.import_snapshot(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert_eq!(s.current().player.card_count(), 20);
    }

    #[test]
    fn test_fault_on_corrupt_state_is_fatal() {
        let mut bad = DuelState::new_duel(&deck(10), &DuelConfig::new().with_seed(1)).unwrap();
        bad.player.hand[0].zone = crate::cards::Zone::Graveyard;
        let mut s = DuelSession::from_state(bad, DuelConfig::new());

        let err = s.dispatch(Action::ChangePhase { next_phase: Phase::Standby }).unwrap_err();

        assert!(matches!(err, DuelError::ActionFailed { kind: ErrorKind::Fatal, .. }));
        assert!(!err.is_recoverable());
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "action handler panicked");
    }
}
