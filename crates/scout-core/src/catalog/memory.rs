//! In-memory catalog backend.
//!
//! BTreeMap storage keyed by locale then card code. Nothing survives the
//! process; used for tests and ephemeral runs.

use super::{BundleInfo, CardCatalog, CatalogStore, SetBundle, apply_reference_fields, select_name_matches};
use crate::locale::Locale;
use crate::settings::GuildSettings;
use crate::{Card, CatalogError};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    cards: BTreeMap<Locale, BTreeMap<String, Card>>,
    bundles: BTreeMap<(Locale, String), BundleInfo>,
    /// Codes contributed by each bundle, so a newer copy replaces it wholesale.
    bundle_codes: BTreeMap<(Locale, String), Vec<String>>,
    guilds: BTreeMap<String, GuildSettings>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog holding `cards` for `locale`, without bundle metadata.
    ///
    /// Reference fields are taken as given.
    #[must_use]
    pub fn with_cards<I>(locale: Locale, cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        let mut catalog = Self::new();
        catalog.insert_cards(locale, cards);
        catalog
    }

    /// Insert or overwrite cards directly.
    pub fn insert_cards<I>(&mut self, locale: Locale, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        let table = self.cards.entry(locale).or_default();
        for card in cards {
            table.insert(card.card_code.clone(), card);
        }
    }

    fn refresh_translations(&mut self, english: &[Card]) {
        for (locale, table) in &mut self.cards {
            if *locale == Locale::EnUs {
                continue;
            }
            for en in english {
                if let Some(card) = table.get_mut(&en.card_code) {
                    apply_reference_fields(card, Some(en));
                }
            }
        }
    }
}

impl CardCatalog for MemoryCatalog {
    fn find_by_codes(&self, locale: Locale, codes: &[&str]) -> Result<Vec<Card>, CatalogError> {
        let Some(table) = self.cards.get(&locale) else {
            return Ok(Vec::new());
        };
        Ok(codes
            .iter()
            .filter_map(|code| table.get(*code))
            .cloned()
            .collect())
    }

    fn search_by_name(&self, locale: Locale, query: &str) -> Result<Vec<Card>, CatalogError> {
        Ok(self
            .cards
            .get(&locale)
            .map(|table| select_name_matches(table.values(), query))
            .unwrap_or_default())
    }
}

impl CatalogStore for MemoryCatalog {
    fn import_bundle(&mut self, bundle: SetBundle) -> Result<bool, CatalogError> {
        let key = (bundle.locale, bundle.set.clone());
        if let Some(stored) = self.bundles.get(&key)
            && stored.last_modified >= bundle.last_modified
        {
            return Ok(false);
        }

        let info = bundle.info();
        let locale = bundle.locale;

        let stale = self.bundle_codes.remove(&key).unwrap_or_default();
        if let Some(table) = self.cards.get_mut(&locale) {
            for code in &stale {
                table.remove(code);
            }
        }

        let mut cards = bundle.cards;
        for card in &mut cards {
            let english = if locale == Locale::EnUs {
                None
            } else {
                self.cards
                    .get(&Locale::EnUs)
                    .and_then(|en| en.get(&card.card_code))
            };
            apply_reference_fields(card, english);
        }

        if locale == Locale::EnUs {
            self.refresh_translations(&cards);
        }

        self.bundle_codes
            .insert(key.clone(), cards.iter().map(|c| c.card_code.clone()).collect());
        self.insert_cards(locale, cards);
        self.bundles.insert(key, info);
        Ok(true)
    }

    fn bundles(&self) -> Result<Vec<BundleInfo>, CatalogError> {
        Ok(self.bundles.values().cloned().collect())
    }

    fn card_count(&self, locale: Locale) -> Result<usize, CatalogError> {
        Ok(self.cards.get(&locale).map_or(0, BTreeMap::len))
    }

    fn guild_settings(&self, guild_id: &str) -> Result<Option<GuildSettings>, CatalogError> {
        Ok(self.guilds.get(guild_id).cloned())
    }

    fn save_guild_settings(
        &mut self,
        guild_id: &str,
        settings: &GuildSettings,
    ) -> Result<(), CatalogError> {
        self.guilds.insert(guild_id.to_string(), settings.clone());
        Ok(())
    }
}
