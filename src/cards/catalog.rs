//! Card catalog boundary.
//!
//! The duel engine only ever needs a card's `CardId`. Names, artwork and card
//! types live in an external catalog that callers (renderers, loggers) consult
//! through `CardCatalog`. `InMemoryCatalog` is a simple map-backed
//! implementation for tests and offline tools.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::instance::{CardId, CardInstance};

/// Catalog metadata for a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub id: CardId,
    pub name: String,
    /// Image reference (URL or asset key).
    pub image_ref: Option<String>,
    /// Free-form card type ("Normal Monster", "Spell Card", ...).
    pub card_type: String,
}

impl CardData {
    pub fn new(id: CardId, name: impl Into<String>, card_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_ref: None,
            card_type: card_type.into(),
        }
    }

    #[must_use]
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}

/// Read-only card metadata lookup.
pub trait CardCatalog {
    /// Look up a card by catalog ID.
    fn card_data(&self, id: &CardId) -> Option<&CardData>;

    /// Look up the catalog entry behind a duel instance.
    fn instance_data(&self, card: &CardInstance) -> Option<&CardData> {
        self.card_data(&card.card_id)
    }

    /// Display names for a sequence of instances, falling back to the raw ID
    /// for cards the catalog does not know.
    fn describe<'a>(&self, cards: impl IntoIterator<Item = &'a CardInstance>) -> Vec<String>
    where
        Self: Sized,
    {
        cards
            .into_iter()
            .map(|card| {
                self.instance_data(card)
                    .map_or_else(|| card.card_id.to_string(), |data| data.name.clone())
            })
            .collect()
    }
}

/// Map-backed catalog.
///
/// ```
/// use duel_engine::cards::{CardCatalog, CardData, CardId, InMemoryCatalog};
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.insert(CardData::new(CardId::from("46986414"), "Dark Magician", "Normal Monster"));
///
/// let found = catalog.card_data(&CardId::from("46986414")).unwrap();
/// assert_eq!(found.name, "Dark Magician");
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    cards: FxHashMap<CardId, CardData>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a card's metadata.
    pub fn insert(&mut self, data: CardData) {
        self.cards.insert(data.id.clone(), data);
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

impl FromIterator<CardData> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = CardData>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for data in iter {
            catalog.insert(data);
        }
        catalog
    }
}

impl CardCatalog for InMemoryCatalog {
    fn card_data(&self, id: &CardId) -> Option<&CardData> {
        self.cards.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Zone;
    use crate::core::PlayerId;

    fn catalog() -> InMemoryCatalog {
        [
            CardData::new(CardId::from("1"), "Blue-Eyes White Dragon", "Normal Monster").with_image("img/1.png"),
            CardData::new(CardId::from("2"), "Pot of Greed", "Spell Card"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup() {
        let catalog = catalog();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.card_data(&CardId::from("1")).unwrap().image_ref.as_deref(),
            Some("img/1.png")
        );
        assert!(catalog.card_data(&CardId::from("3")).is_none());
    }

    #[test]
    fn test_instance_lookup() {
        let catalog = catalog();
        let card = CardInstance::new(CardId::from("2"), PlayerId::Player, Zone::Hand);

        assert_eq!(catalog.instance_data(&card).unwrap().card_type, "Spell Card");
    }

    #[test]
    fn test_describe_falls_back_to_id() {
        let catalog = catalog();
        let cards = vec![
            CardInstance::new(CardId::from("1"), PlayerId::Player, Zone::Hand),
            CardInstance::new(CardId::from("unknown"), PlayerId::Player, Zone::Hand),
        ];

        assert_eq!(catalog.describe(&cards), vec!["Blue-Eyes White Dragon", "unknown"]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut catalog = catalog();
        catalog.insert(CardData::new(CardId::from("2"), "Pot of Avarice", "Spell Card"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.card_data(&CardId::from("2")).unwrap().name, "Pot of Avarice");
    }
}
