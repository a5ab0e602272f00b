//! Duel state: the aggregate root.
//!
//! ## PlayerState
//!
//! Everything one side owns: life points, hand, the two five-slot field zones,
//! the field spell slot, graveyard, deck and extra deck.
//!
//! ## DuelState
//!
//! Both sides plus turn/phase bookkeeping and the outcome. A `DuelState` is a
//! value: the rules module never edits one in place, it returns a new one.
//! Card sequences are `im::Vector`s, so copying a state shares structure with
//! its predecessor and history snapshots stay cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::{DuelConfig, ZONE_SLOTS};
use super::entity::InstanceId;
use super::error::DeckLoadError;
use super::phase::Phase;
use super::player::PlayerId;
use super::rng::GameRng;
use crate::cards::{CardId, CardInstance, Position, Zone};

/// A deck as supplied by the deck builder: a list of catalog card IDs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub cards: Vec<CardId>,
}

impl Deck {
    pub fn new<I, C>(cards: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CardId>,
    {
        Self {
            cards: cards.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A fixed row of five field slots.
///
/// The row never grows or shrinks; each slot holds at most one card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSlots {
    slots: [Option<CardInstance>; ZONE_SLOTS],
}

impl ZoneSlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Card in slot `index`, if any. Out-of-range indices are empty.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CardInstance> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Index of the leftmost empty slot.
    #[must_use]
    pub fn first_open(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Put `card` into an empty slot.
    ///
    /// Hands the card back if the slot is occupied or out of range.
    pub fn place(&mut self, index: usize, card: CardInstance) -> Result<(), CardInstance> {
        match self.slots.get_mut(index) {
            Some(slot) if slot.is_none() => {
                *slot = Some(card);
                Ok(())
            }
            _ => Err(card),
        }
    }

    /// Remove and return the card in slot `index`.
    pub fn take(&mut self, index: usize) -> Option<CardInstance> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Find a card by instance ID, with its slot index.
    #[must_use]
    pub fn find(&self, id: InstanceId) -> Option<(usize, &CardInstance)> {
        self.occupied().find(|(_, card)| card.instance_id == id)
    }

    /// Mutable lookup by instance ID.
    pub fn find_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.slots
            .iter_mut()
            .flatten()
            .find(|card| card.instance_id == id)
    }

    /// Occupied slots as `(index, card)` pairs.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &CardInstance)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|card| (i, card)))
    }

    /// Mutable iteration over the cards present.
    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut CardInstance> {
        self.slots.iter_mut().flatten()
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Always `ZONE_SLOTS`.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// One side's cards and life points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Life points, never below zero.
    pub lp: u32,

    /// Hand in draw order.
    pub hand: Vector<CardInstance>,

    pub monster_zone: ZoneSlots,

    pub spell_trap_zone: ZoneSlots,

    /// Reserved; no current rule places a card here.
    pub field_spell: Option<CardInstance>,

    /// Append-only within a duel.
    pub graveyard: Vector<CardInstance>,

    /// Draw pile; the front is the next draw.
    pub deck: Vector<CardInstance>,

    /// Reserved; no current rule draws from it.
    pub extra_deck: Vector<CardInstance>,
}

impl PlayerState {
    /// An empty side with `lp` life points.
    #[must_use]
    pub fn new(lp: u32) -> Self {
        Self {
            lp,
            hand: Vector::new(),
            monster_zone: ZoneSlots::new(),
            spell_trap_zone: ZoneSlots::new(),
            field_spell: None,
            graveyard: Vector::new(),
            deck: Vector::new(),
            extra_deck: Vector::new(),
        }
    }

    /// Position of a card in the hand.
    #[must_use]
    pub fn hand_index(&self, id: InstanceId) -> Option<usize> {
        self.hand.iter().position(|card| card.instance_id == id)
    }

    #[must_use]
    pub fn in_hand(&self, id: InstanceId) -> bool {
        self.hand_index(id).is_some()
    }

    /// Every card this side holds, tagged with the zone it is stored in.
    pub fn cards_by_zone(&self) -> impl Iterator<Item = (Zone, &CardInstance)> {
        tagged(Zone::Hand, &self.hand)
            .chain(self.monster_zone.occupied().map(|(_, c)| (Zone::MonsterZone, c)))
            .chain(self.spell_trap_zone.occupied().map(|(_, c)| (Zone::SpellTrapZone, c)))
            .chain(self.field_spell.iter().map(|c| (Zone::FieldZone, c)))
            .chain(tagged(Zone::Graveyard, &self.graveyard))
            .chain(tagged(Zone::Deck, &self.deck))
            .chain(tagged(Zone::ExtraDeck, &self.extra_deck))
    }

    /// Total number of cards across every zone.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len()
            + self.deck.len()
            + self.graveyard.len()
            + self.extra_deck.len()
            + self.monster_zone.occupied_count()
            + self.spell_trap_zone.occupied_count()
            + usize::from(self.field_spell.is_some())
    }
}

fn tagged(zone: Zone, cards: &Vector<CardInstance>) -> impl Iterator<Item = (Zone, &CardInstance)> {
    cards.iter().map(move |card| (zone, card))
}

/// Complete duel state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelState {
    /// Whose turn it is.
    pub turn_player: PlayerId,

    pub phase: Phase,

    /// Starts at 1; incremented on every return to `DRAW`.
    pub turn_count: u32,

    pub player: PlayerState,

    pub opponent: PlayerState,

    /// Reset on every transition into `DRAW`.
    pub normal_summon_used_this_turn: bool,

    pub duel_ended: bool,

    /// Set only together with `duel_ended`; `None` after an ended duel is a draw.
    pub winner: Option<PlayerId>,

    /// Deck order before shuffling.
    pub initial_deck_order: Vector<CardId>,

    /// Seed the deck was shuffled with. Starting again from the same deck
    /// with this seed deals the same cards.
    pub shuffle_seed: u64,
}

impl DuelState {
    /// Start a duel from a deck.
    ///
    /// Shuffles with `config.seed` (entropy when unset), deals the opening
    /// hand to the player and leaves the opponent with an empty side.
    ///
    /// ```
    /// use duel_engine::core::{Deck, DuelConfig, DuelState, Phase};
    ///
    /// let deck = Deck::new((0..20).map(|i| i.to_string()));
    /// let state = DuelState::new_duel(&deck, &DuelConfig::new().with_seed(1)).unwrap();
    ///
    /// assert_eq!(state.player.hand.len(), 5);
    /// assert_eq!(state.player.deck.len(), 15);
    /// assert_eq!(state.phase, Phase::Draw);
    /// ```
    pub fn new_duel(deck: &Deck, config: &DuelConfig) -> Result<Self, DeckLoadError> {
        let mut rng = GameRng::from_seed_option(config.seed);
        Self::new_duel_with_rng(deck, config, &mut rng)
    }

    /// Start a duel using a caller-owned RNG.
    pub fn new_duel_with_rng(
        deck: &Deck,
        config: &DuelConfig,
        rng: &mut GameRng,
    ) -> Result<Self, DeckLoadError> {
        if deck.is_empty() {
            return Err(DeckLoadError::EmptyDeck);
        }
        if let Some(index) = deck.cards.iter().position(|id| !id.is_usable()) {
            return Err(DeckLoadError::UnusableCardId { index });
        }

        let mut order = deck.cards.clone();
        rng.shuffle(&mut order);

        let mut pile: Vector<CardInstance> = order
            .into_iter()
            .map(|id| CardInstance::new(id, PlayerId::Player, Zone::Deck))
            .collect();

        let dealt = config.opening_hand_size.min(pile.len());
        let rest = pile.split_off(dealt);
        let hand = pile
            .into_iter()
            .map(|mut card| {
                card.place(Zone::Hand, Position::FaceUpAttack);
                card
            })
            .collect();

        let mut player = PlayerState::new(config.starting_lp);
        player.hand = hand;
        player.deck = rest;

        Ok(Self {
            turn_player: PlayerId::Player,
            phase: Phase::Draw,
            turn_count: 1,
            player,
            opponent: PlayerState::new(config.starting_lp),
            normal_summon_used_this_turn: false,
            duel_ended: false,
            winner: None,
            initial_deck_order: deck.cards.iter().cloned().collect(),
            shuffle_seed: rng.seed(),
        })
    }

    /// One side's state.
    #[must_use]
    pub fn side(&self, player: PlayerId) -> &PlayerState {
        match player {
            PlayerId::Player => &self.player,
            PlayerId::Opponent => &self.opponent,
        }
    }

    /// One side's state, mutably.
    pub fn side_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        match player {
            PlayerId::Player => &mut self.player,
            PlayerId::Opponent => &mut self.opponent,
        }
    }

    /// How many cards `player` brought into the duel.
    ///
    /// The opponent is passive and starts with none.
    #[must_use]
    pub fn original_card_count(&self, player: PlayerId) -> usize {
        match player {
            PlayerId::Player => self.initial_deck_order.len(),
            PlayerId::Opponent => 0,
        }
    }

    /// Locate a card anywhere on the field (either side's monster or
    /// spell/trap zone).
    #[must_use]
    pub fn find_on_field(&self, id: InstanceId) -> Option<&CardInstance> {
        PlayerId::all().find_map(|p| {
            let side = self.side(p);
            side.monster_zone
                .find(id)
                .or_else(|| side.spell_trap_zone.find(id))
                .map(|(_, card)| card)
        })
    }
}
