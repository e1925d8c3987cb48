//! # Card Catalog
//!
//! The read-side contract the deck pipeline needs from the card store, and the
//! write side used when importing set bundles.
//!
//! - `CardCatalog`: batched lookup by code and name search, per locale.
//! - `CatalogStore`: bundle import, counts, and per-guild settings.
//!
//! Two backends implement both traits: `MemoryCatalog` (BTreeMap, volatile)
//! and `RedbCatalog` (disk-backed). `Catalog` selects one at runtime.

mod backend;
mod bundle;
mod memory;

pub use backend::Catalog;
pub use bundle::{BundleInfo, SetBundle, parse_bundle_file_name};
pub use memory::MemoryCatalog;

use crate::locale::Locale;
use crate::primitives::MAX_SEARCH_RESULTS;
use crate::settings::GuildSettings;
use crate::{Card, CatalogError};
use std::collections::BTreeSet;

// =============================================================================
// READ SIDE
// =============================================================================

/// Card lookup for one locale at a time.
///
/// Codes absent from the catalog are simply missing from the result; only
/// transport or storage failures are errors.
pub trait CardCatalog {
    /// Fetch every card whose code is in `codes`, in one call.
    fn find_by_codes(&self, locale: Locale, codes: &[&str]) -> Result<Vec<Card>, CatalogError>;

    /// Cards whose name contains `query`, case-insensitively.
    ///
    /// Results are unique by name, ordered by card code, and capped at
    /// `MAX_SEARCH_RESULTS`. An empty query matches nothing.
    fn search_by_name(&self, locale: Locale, query: &str) -> Result<Vec<Card>, CatalogError>;
}

impl<T: CardCatalog + ?Sized> CardCatalog for &T {
    fn find_by_codes(&self, locale: Locale, codes: &[&str]) -> Result<Vec<Card>, CatalogError> {
        (**self).find_by_codes(locale, codes)
    }

    fn search_by_name(&self, locale: Locale, query: &str) -> Result<Vec<Card>, CatalogError> {
        (**self).search_by_name(locale, query)
    }
}

// =============================================================================
// WRITE SIDE
// =============================================================================

/// Mutable operations on a catalog backend.
pub trait CatalogStore: CardCatalog {
    /// Store a set bundle, replacing the previous copy of the same
    /// `(locale, set)` only when this one is newer.
    ///
    /// Returns `true` when the bundle was applied.
    fn import_bundle(&mut self, bundle: SetBundle) -> Result<bool, CatalogError>;

    /// Metadata of every stored bundle, ordered by locale then set.
    fn bundles(&self) -> Result<Vec<BundleInfo>, CatalogError>;

    /// Number of cards stored for `locale`.
    fn card_count(&self, locale: Locale) -> Result<usize, CatalogError>;

    fn guild_settings(&self, guild_id: &str) -> Result<Option<GuildSettings>, CatalogError>;

    fn save_guild_settings(
        &mut self,
        guild_id: &str,
        settings: &GuildSettings,
    ) -> Result<(), CatalogError>;
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Apply the name search rules to cards already ordered by code.
pub(crate) fn select_name_matches<'a, I>(cards: I, query: &str) -> Vec<Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut seen_names = BTreeSet::new();
    cards
        .into_iter()
        .filter(|card| card.name.to_lowercase().contains(&needle))
        .filter(|card| seen_names.insert(card.name.clone()))
        .take(MAX_SEARCH_RESULTS)
        .cloned()
        .collect()
}

/// Fill the locale independent fields from the `en_us` copy of the card.
///
/// Falls back to the card's own values when no English copy is known, which
/// is exact for `en_us` bundles themselves.
pub(crate) fn apply_reference_fields(card: &mut Card, english: Option<&Card>) {
    match english {
        Some(en) => {
            card.type_ref.clone_from(&en.card_type);
            card.supertype_ref.clone_from(&en.supertype);
        }
        None => {
            if card.type_ref.is_empty() {
                card.type_ref.clone_from(&card.card_type);
            }
            if card.supertype_ref.is_empty() {
                card.supertype_ref.clone_from(&card.supertype);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_is_case_insensitive_and_unique_by_name() {
        let cards = [
            Card::new("01NX001", "Darius"),
            Card::new("01NX002", "Darius"),
            Card::new("01NX003", "Draven"),
        ];
        let found = select_name_matches(&cards, "dARi");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].card_code, "01NX001");
    }

    #[test]
    fn search_caps_results() {
        let cards: Vec<_> = (0..40)
            .map(|i| Card::new(format!("01NX{i:03}"), format!("Poro {i}")))
            .collect();
        assert_eq!(select_name_matches(&cards, "poro").len(), MAX_SEARCH_RESULTS);
    }

    #[test]
    fn blank_search_matches_nothing() {
        let cards = [Card::new("01NX001", "Darius")];
        assert!(select_name_matches(&cards, "  ").is_empty());
    }

    #[test]
    fn reference_fields_prefer_english() {
        let mut card = Card::new("01NX001", "Darius");
        card.card_type = "Unidade".into();
        let en = Card::new("01NX001", "Darius")
            .with_type("Unit")
            .with_supertype("Champion");
        apply_reference_fields(&mut card, Some(&en));
        assert_eq!(card.type_ref, "Unit");
        assert_eq!(card.supertype_ref, "Champion");

        let mut own = Card::new("01NX002", "Legion Rearguard");
        own.card_type = "Unit".into();
        apply_reference_fields(&mut own, None);
        assert_eq!(own.type_ref, "Unit");
    }
}
