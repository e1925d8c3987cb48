//! # Category Classifier
//!
//! Partitions a resolved deck into display buckets. Predicates are tried in
//! `Category::DISPLAY_ORDER` and the first match wins, so no entry lands in two
//! buckets. Entries matching no predicate are set aside as uncategorized.

use crate::primitives::CHAMPION;
use crate::{Card, Deck, DeckEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A display bucket.
///
/// Variant order is the display priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Champion,
    Follower,
    Spell,
    Landmark,
    Equipment,
}

impl Category {
    pub const DISPLAY_ORDER: [Category; 5] = [
        Category::Champion,
        Category::Follower,
        Category::Spell,
        Category::Landmark,
        Category::Equipment,
    ];

    /// Bucket title, also the message key for its localized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::Champion => "Champions",
            Category::Follower => "Followers",
            Category::Spell => "Spells",
            Category::Landmark => "Landmarks",
            Category::Equipment => "Equipments",
        }
    }

    /// Whether `card` satisfies this bucket's predicate on its own.
    #[must_use]
    pub fn matches(self, card: &Card) -> bool {
        match self {
            Category::Champion => card.rarity_ref == CHAMPION,
            Category::Follower => card.type_ref == "Unit" && card.rarity_ref != CHAMPION,
            Category::Spell => card.type_ref == "Spell",
            Category::Landmark => card.type_ref == "Landmark",
            Category::Equipment => card.type_ref == "Equipment",
        }
    }

    /// First category in display order that `card` matches.
    #[must_use]
    pub fn of(card: &Card) -> Option<Category> {
        Self::DISPLAY_ORDER.into_iter().find(|c| c.matches(card))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of `classify`.
///
/// Only non-empty buckets are present. Iterating `buckets()` yields them in
/// display order, each in the deck's own order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Categories {
    buckets: BTreeMap<Category, Vec<DeckEntry>>,
    uncategorized: Vec<DeckEntry>,
}

impl Categories {
    #[must_use]
    pub fn get(&self, category: Category) -> Option<&[DeckEntry]> {
        self.buckets.get(&category).map(Vec::as_slice)
    }

    pub fn buckets(&self) -> impl Iterator<Item = (Category, &[DeckEntry])> {
        self.buckets.iter().map(|(c, entries)| (*c, entries.as_slice()))
    }

    /// Number of non-empty buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Entries whose card matched no category. They are not displayed.
    #[must_use]
    pub fn uncategorized(&self) -> &[DeckEntry] {
        &self.uncategorized
    }
}

/// Partition `deck` into display buckets.
#[must_use]
pub fn classify(deck: &Deck) -> Categories {
    let mut categories = Categories::default();
    for entry in deck {
        match Category::of(&entry.card) {
            Some(category) => categories
                .buckets
                .entry(category)
                .or_default()
                .push(entry.clone()),
            None => categories.uncategorized.push(entry.clone()),
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(code: &str, type_ref: &str, rarity_ref: &str) -> Card {
        Card::new(code, code).with_type(type_ref).with_rarity(rarity_ref)
    }

    #[test]
    fn champion_wins_over_unit() {
        assert_eq!(Category::of(&card("a", "Unit", "Champion")), Some(Category::Champion));
        assert_eq!(Category::of(&card("b", "Unit", "Common")), Some(Category::Follower));
    }

    #[test]
    fn champion_spell_is_a_champion() {
        // Rarity alone decides: a champion's spell still counts as a champion.
        assert_eq!(Category::of(&card("c", "Spell", "Champion")), Some(Category::Champion));
    }

    #[test]
    fn unknown_types_are_uncategorized() {
        let deck = Deck::new(
            vec![
                DeckEntry::new(card("a", "Ability", "None"), 1),
                DeckEntry::new(card("b", "Spell", "Rare"), 2),
            ],
            vec![],
        );
        let categories = classify(&deck);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories.uncategorized().len(), 1);
        assert_eq!(categories.uncategorized()[0].card.card_code, "a");
    }

    #[test]
    fn empty_buckets_are_omitted() {
        let deck = Deck::new(vec![DeckEntry::new(card("a", "Landmark", "Rare"), 1)], vec![]);
        let categories = classify(&deck);
        assert!(categories.get(Category::Spell).is_none());
        assert_eq!(categories.get(Category::Landmark).map(<[_]>::len), Some(1));
    }

    #[test]
    fn buckets_iterate_in_display_order() {
        let deck = Deck::new(
            vec![
                DeckEntry::new(card("e", "Equipment", "Rare"), 1),
                DeckEntry::new(card("s", "Spell", "Rare"), 1),
                DeckEntry::new(card("c", "Unit", "Champion"), 1),
            ],
            vec![],
        );
        let order: Vec<_> = classify(&deck).buckets().map(|(c, _)| c).collect();
        assert_eq!(order, vec![Category::Champion, Category::Spell, Category::Equipment]);
    }

    #[test]
    fn labels_match_message_keys() {
        let labels: Vec<_> = Category::DISPLAY_ORDER.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["Champions", "Followers", "Spells", "Landmarks", "Equipments"]);
    }
}
