//! Runtime choice of catalog backend.
//!
//! - `InMemory`: `MemoryCatalog` (fast, volatile)
//! - `Persistent`: `RedbCatalog` (disk-backed, ACID)

use super::{BundleInfo, CardCatalog, CatalogStore, MemoryCatalog, SetBundle};
use crate::locale::Locale;
use crate::settings::GuildSettings;
use crate::storage::RedbCatalog;
use crate::{Card, CatalogError};
use std::path::Path;

#[derive(Debug)]
pub enum Catalog {
    InMemory(MemoryCatalog),
    Persistent(RedbCatalog),
}

// NOTE: Catalog does NOT implement Clone. The redb handle cannot be cloned;
// share it behind a lock instead.

impl Default for Catalog {
    fn default() -> Self {
        Self::InMemory(MemoryCatalog::new())
    }
}

impl Catalog {
    /// Open or create a persistent catalog at `path`.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Ok(Self::Persistent(RedbCatalog::open(path)?))
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Persistent(_))
    }

    /// Reclaim space after large imports. No-op in memory.
    pub fn compact(&mut self) -> Result<(), CatalogError> {
        match self {
            Self::InMemory(_) => Ok(()),
            Self::Persistent(c) => c.compact(),
        }
    }
}

impl From<MemoryCatalog> for Catalog {
    fn from(catalog: MemoryCatalog) -> Self {
        Self::InMemory(catalog)
    }
}

impl From<RedbCatalog> for Catalog {
    fn from(catalog: RedbCatalog) -> Self {
        Self::Persistent(catalog)
    }
}

impl CardCatalog for Catalog {
    fn find_by_codes(&self, locale: Locale, codes: &[&str]) -> Result<Vec<Card>, CatalogError> {
        match self {
            Self::InMemory(c) => c.find_by_codes(locale, codes),
            Self::Persistent(c) => c.find_by_codes(locale, codes),
        }
    }

    fn search_by_name(&self, locale: Locale, query: &str) -> Result<Vec<Card>, CatalogError> {
        match self {
            Self::InMemory(c) => c.search_by_name(locale, query),
            Self::Persistent(c) => c.search_by_name(locale, query),
        }
    }
}

impl CatalogStore for Catalog {
    fn import_bundle(&mut self, bundle: SetBundle) -> Result<bool, CatalogError> {
        match self {
            Self::InMemory(c) => c.import_bundle(bundle),
            Self::Persistent(c) => c.import_bundle(bundle),
        }
    }

    fn bundles(&self) -> Result<Vec<BundleInfo>, CatalogError> {
        match self {
            Self::InMemory(c) => c.bundles(),
            Self::Persistent(c) => c.bundles(),
        }
    }

    fn card_count(&self, locale: Locale) -> Result<usize, CatalogError> {
        match self {
            Self::InMemory(c) => c.card_count(locale),
            Self::Persistent(c) => c.card_count(locale),
        }
    }

    fn guild_settings(&self, guild_id: &str) -> Result<Option<GuildSettings>, CatalogError> {
        match self {
            Self::InMemory(c) => c.guild_settings(guild_id),
            Self::Persistent(c) => c.guild_settings(guild_id),
        }
    }

    fn save_guild_settings(
        &mut self,
        guild_id: &str,
        settings: &GuildSettings,
    ) -> Result<(), CatalogError> {
        match self {
            Self::InMemory(c) => c.save_guild_settings(guild_id, settings),
            Self::Persistent(c) => c.save_guild_settings(guild_id, settings),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_is_in_memory() {
        assert!(!Catalog::default().is_persistent());
    }

    #[test]
    fn both_backends_answer_the_same() {
        let temp = tempdir().expect("temp dir");
        let mut backends = [
            Catalog::default(),
            Catalog::with_redb(temp.path().join("cards.redb")).expect("open db"),
        ];

        for catalog in &mut backends {
            let mut card = Card::new("02BW026", "Gangplank");
            card.card_type = "Unit".into();
            card.supertype = "Champion".into();
            catalog
                .import_bundle(SetBundle {
                    locale: Locale::EnUs,
                    set: "set2".into(),
                    version: "1.0.0".into(),
                    last_modified: 1,
                    cards: vec![card],
                })
                .expect("import");
        }

        for catalog in &backends {
            let found = catalog.find_by_codes(Locale::EnUs, &["02BW026"]).expect("lookup");
            assert!(found[0].is_champion_unit());
            assert_eq!(catalog.search_by_name(Locale::EnUs, "gang").expect("search").len(), 1);
        }
    }
}
