//! # Core Type Definitions
//!
//! This module contains the data model shared by every stage of the pipeline:
//! - Catalog records (`Card`, `CardAsset`)
//! - Decoded and resolved deck entries (`DeckCodeEntry`, `DeckEntry`, `Deck`)
//! - Error types (`ScoutError`, `CatalogError`)
//!
//! ## Determinism Guarantees
//!
//! - `Deck` ordering is fixed: cost ascending, then name ascending.
//! - Names compare byte-wise, so the order does not depend on the host locale.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

use crate::codec::{DecodeError, EncodeError};
use crate::primitives::CHAMPION;

// =============================================================================
// CARD
// =============================================================================

/// Image references for a card, as published by Data Dragon.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardAsset {
    pub game_absolute_path: String,
    pub full_absolute_path: String,
}

/// One catalog entry for one locale.
///
/// The same logical card exists once per locale; every copy shares
/// `card_code` and differs only in localized text. Records are immutable once
/// loaded and replaced wholesale on the next import.
///
/// `type_ref` and `supertype_ref` carry the `en_us` values of `card_type` and
/// `supertype` so that classification never depends on translated text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Card {
    pub card_code: String,
    pub name: String,
    pub cost: u32,
    pub attack: i32,
    pub health: i32,
    #[serde(rename = "type")]
    pub card_type: String,
    pub type_ref: String,
    pub supertype: String,
    pub supertype_ref: String,
    pub rarity: String,
    pub rarity_ref: String,
    pub subtypes: Vec<String>,
    pub regions: Vec<String>,
    pub region_refs: Vec<String>,
    pub description: String,
    pub description_raw: String,
    pub levelup_description: String,
    pub levelup_description_raw: String,
    pub flavor_text: String,
    pub artist_name: String,
    pub associated_cards: Vec<String>,
    pub associated_card_refs: Vec<String>,
    pub assets: Vec<CardAsset>,
    pub keywords: Vec<String>,
    pub keyword_refs: Vec<String>,
    pub spell_speed: String,
    pub spell_speed_ref: String,
    pub collectible: bool,
    pub set: String,
    pub formats: Vec<String>,
    pub format_refs: Vec<String>,
}

impl Card {
    /// Create a card with only its code and name set.
    #[must_use]
    pub fn new(card_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            card_code: card_code.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the mana cost.
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Set both the localized and reference type.
    #[must_use]
    pub fn with_type(mut self, card_type: impl Into<String>) -> Self {
        let card_type = card_type.into();
        self.type_ref.clone_from(&card_type);
        self.card_type = card_type;
        self
    }

    /// Set both the localized and reference rarity.
    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        let rarity = rarity.into();
        self.rarity_ref.clone_from(&rarity);
        self.rarity = rarity;
        self
    }

    /// Set both the localized and reference supertype.
    #[must_use]
    pub fn with_supertype(mut self, supertype: impl Into<String>) -> Self {
        let supertype = supertype.into();
        self.supertype_ref.clone_from(&supertype);
        self.supertype = supertype;
        self
    }

    /// Set region references (e.g. `"Noxus"`).
    #[must_use]
    pub fn with_regions<I, S>(mut self, region_refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.region_refs = region_refs.into_iter().map(Into::into).collect();
        self.regions.clone_from(&self.region_refs);
        self
    }

    /// Set associated card references (other levels, spawned cards).
    #[must_use]
    pub fn with_associated<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.associated_card_refs = codes.into_iter().map(Into::into).collect();
        self
    }

    /// A champion unit: `supertype_ref` is "Champion" and `type_ref` is "Unit".
    #[must_use]
    pub fn is_champion_unit(&self) -> bool {
        self.supertype_ref == CHAMPION && self.type_ref == "Unit"
    }
}

// =============================================================================
// DECK ENTRIES
// =============================================================================

/// A decoded `(card code, count)` pair, before any catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeckCodeEntry {
    pub card_code: String,
    pub count: u32,
}

impl DeckCodeEntry {
    #[must_use]
    pub fn new(card_code: impl Into<String>, count: u32) -> Self {
        Self {
            card_code: card_code.into(),
            count,
        }
    }
}

/// A resolved `(card, count)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub count: u32,
    pub card: Card,
}

impl DeckEntry {
    #[must_use]
    pub fn new(card: Card, count: u32) -> Self {
        Self { count, card }
    }
}

/// Display order of deck entries: cost ascending, then name ascending, then
/// card code so printings that share a name and cost have a fixed order.
#[must_use]
pub fn compare_entries(a: &DeckEntry, b: &DeckEntry) -> Ordering {
    a.card
        .cost
        .cmp(&b.card.cost)
        .then_with(|| a.card.name.cmp(&b.card.name))
        .then_with(|| a.card.card_code.cmp(&b.card.card_code))
}

// =============================================================================
// DECK
// =============================================================================

/// A resolved deck.
///
/// Entries are kept in display order (see `compare_entries`). Decoded entries
/// whose card code was not found in the catalog are not part of the deck; they
/// are kept aside in `unresolved` for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Deck {
    entries: Vec<DeckEntry>,
    unresolved: Vec<DeckCodeEntry>,
}

impl Deck {
    /// Build a deck, sorting entries into display order.
    ///
    /// The sort is stable: entries with equal cost, name and card code keep
    /// their relative input order.
    #[must_use]
    pub fn new(mut entries: Vec<DeckEntry>, unresolved: Vec<DeckCodeEntry>) -> Self {
        entries.sort_by(compare_entries);
        Self {
            entries,
            unresolved,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    /// Decoded entries that had no catalog record.
    #[must_use]
    pub fn unresolved(&self) -> &[DeckCodeEntry] {
        &self.unresolved
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeckEntry> {
        self.entries.iter()
    }

    /// Sum of all copies in the deck.
    #[must_use]
    pub fn card_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.count)).sum()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a DeckEntry;
    type IntoIter = std::slice::Iter<'a, DeckEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Failure of a catalog collaborator.
///
/// Only transport or storage problems are errors; a card code that is simply
/// absent from the catalog is not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The backing store could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored record could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors that can occur in the Scout pipeline.
///
/// - No silent failures: every fallible operation returns `Result<T, ScoutError>`
/// - The wrapped cause is preserved for logs; user-facing text stays generic
#[derive(Debug, Error)]
pub enum ScoutError {
    /// The deck code could not be decoded.
    #[error("failed to decode deck: {0}")]
    Decode(#[from] DecodeError),

    /// A deck could not be encoded.
    #[error("failed to encode deck: {0}")]
    Encode(#[from] EncodeError),

    /// The catalog lookup itself failed.
    #[error("failed to find cards: {0}")]
    Catalog(#[from] CatalogError),

    /// The locale string is not one of the supported locales.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// No card with this code exists for the requested locale.
    #[error("card not found: {0}")]
    CardNotFound(String),

    /// A deck viewer template was rejected.
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// A set bundle or message file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================
