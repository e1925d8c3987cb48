//! # redb-backed Card Catalog
//!
//! A disk-backed catalog using the redb embedded database. Imported bundles
//! survive restarts, and every import is one ACID write transaction, so a
//! crashed import leaves the previous copy of the set intact.
//!
//! ## Layout
//!
//! Keys are `"<locale>:<id>"` strings so that one locale's rows are a
//! contiguous key range ordered by card code.

use crate::catalog::{
    BundleInfo, CardCatalog, CatalogStore, SetBundle, apply_reference_fields, select_name_matches,
};
use crate::locale::Locale;
use crate::settings::GuildSettings;
use crate::{Card, CatalogError};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `"<locale>:<card code>"` -> postcard `Card`
const CARDS: TableDefinition<&str, &[u8]> = TableDefinition::new("cards");

/// `"<locale>:<set>"` -> postcard `StoredBundle`
const BUNDLES: TableDefinition<&str, &[u8]> = TableDefinition::new("bundles");

/// guild id -> postcard `GuildSettings`
const GUILD_SETTINGS: TableDefinition<&str, &[u8]> = TableDefinition::new("guild_settings");

#[derive(Debug, Serialize, Deserialize)]
struct StoredBundle {
    info: BundleInfo,
    codes: Vec<String>,
}

fn storage_err(e: impl std::fmt::Display) -> CatalogError {
    CatalogError::Storage(e.to_string())
}

fn serialization_err(e: impl std::fmt::Display) -> CatalogError {
    CatalogError::Serialization(e.to_string())
}

fn row_key(locale: Locale, id: &str) -> String {
    format!("{}:{id}", locale.as_str())
}

fn locale_prefix(locale: Locale) -> String {
    format!("{}:", locale.as_str())
}

/// A disk-backed card catalog.
pub struct RedbCatalog {
    db: Database,
}

impl std::fmt::Debug for RedbCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbCatalog").finish_non_exhaustive()
    }
}

impl RedbCatalog {
    /// Open or create a catalog database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let db = Database::create(path.as_ref()).map_err(storage_err)?;

        {
            let write_txn = db.begin_write().map_err(storage_err)?;
            let _ = write_txn.open_table(CARDS).map_err(storage_err)?;
            let _ = write_txn.open_table(BUNDLES).map_err(storage_err)?;
            let _ = write_txn.open_table(GUILD_SETTINGS).map_err(storage_err)?;
            write_txn.commit().map_err(storage_err)?;
        }

        Ok(Self { db })
    }

    /// Compact the database file.
    pub fn compact(&mut self) -> Result<(), CatalogError> {
        self.db.compact().map_err(storage_err)?;
        Ok(())
    }
}

impl CardCatalog for RedbCatalog {
    fn find_by_codes(&self, locale: Locale, codes: &[&str]) -> Result<Vec<Card>, CatalogError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(CARDS).map_err(storage_err)?;

        let mut cards = Vec::with_capacity(codes.len());
        for code in codes {
            if let Some(data) = table.get(row_key(locale, code).as_str()).map_err(storage_err)? {
                let card: Card = postcard::from_bytes(data.value()).map_err(serialization_err)?;
                cards.push(card);
            }
        }
        Ok(cards)
    }

    fn search_by_name(&self, locale: Locale, query: &str) -> Result<Vec<Card>, CatalogError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(CARDS).map_err(storage_err)?;
        let prefix = locale_prefix(locale);

        let mut cards = Vec::new();
        for entry in table.range(prefix.as_str()..).map_err(storage_err)? {
            let (key, value) = entry.map_err(storage_err)?;
            if !key.value().starts_with(&prefix) {
                break;
            }
            let card: Card = postcard::from_bytes(value.value()).map_err(serialization_err)?;
            cards.push(card);
        }
        Ok(select_name_matches(&cards, query))
    }
}

impl CatalogStore for RedbCatalog {
    fn import_bundle(&mut self, bundle: SetBundle) -> Result<bool, CatalogError> {
        let locale = bundle.locale;
        let bundle_key = row_key(locale, &bundle.set);

        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut bundles = write_txn.open_table(BUNDLES).map_err(storage_err)?;
            let mut cards_table = write_txn.open_table(CARDS).map_err(storage_err)?;

            let previous: Option<StoredBundle> = match bundles
                .get(bundle_key.as_str())
                .map_err(storage_err)?
            {
                Some(data) => Some(postcard::from_bytes(data.value()).map_err(serialization_err)?),
                None => None,
            };

            if let Some(stored) = &previous
                && stored.info.last_modified >= bundle.last_modified
            {
                return Ok(false);
            }

            if let Some(stored) = previous {
                for code in &stored.codes {
                    cards_table
                        .remove(row_key(locale, code).as_str())
                        .map_err(storage_err)?;
                }
            }

            let info = bundle.info();
            let mut cards = bundle.cards;
            for card in &mut cards {
                let english: Option<Card> = if locale == Locale::EnUs {
                    None
                } else {
                    match cards_table
                        .get(row_key(Locale::EnUs, &card.card_code).as_str())
                        .map_err(storage_err)?
                    {
                        Some(data) => {
                            Some(postcard::from_bytes(data.value()).map_err(serialization_err)?)
                        }
                        None => None,
                    }
                };
                apply_reference_fields(card, english.as_ref());

                let bytes = postcard::to_allocvec(&*card).map_err(serialization_err)?;
                cards_table
                    .insert(row_key(locale, &card.card_code).as_str(), bytes.as_slice())
                    .map_err(storage_err)?;
            }

            if locale == Locale::EnUs {
                for other in Locale::ALL.into_iter().filter(|l| *l != Locale::EnUs) {
                    for en in &cards {
                        let key = row_key(other, &en.card_code);
                        let translated: Option<Card> =
                            match cards_table.get(key.as_str()).map_err(storage_err)? {
                                Some(data) => Some(
                                    postcard::from_bytes(data.value())
                                        .map_err(serialization_err)?,
                                ),
                                None => None,
                            };
                        if let Some(mut card) = translated {
                            apply_reference_fields(&mut card, Some(en));
                            let bytes = postcard::to_allocvec(&card).map_err(serialization_err)?;
                            cards_table
                                .insert(key.as_str(), bytes.as_slice())
                                .map_err(storage_err)?;
                        }
                    }
                }
            }

            let stored = StoredBundle {
                info,
                codes: cards.into_iter().map(|c| c.card_code).collect(),
            };
            let bytes = postcard::to_allocvec(&stored).map_err(serialization_err)?;
            bundles
                .insert(bundle_key.as_str(), bytes.as_slice())
                .map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(true)
    }

    fn bundles(&self) -> Result<Vec<BundleInfo>, CatalogError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(BUNDLES).map_err(storage_err)?;

        let mut infos = Vec::new();
        for entry in table.iter().map_err(storage_err)? {
            let (_key, value) = entry.map_err(storage_err)?;
            let stored: StoredBundle =
                postcard::from_bytes(value.value()).map_err(serialization_err)?;
            infos.push(stored.info);
        }
        infos.sort_by(|a, b| (a.locale, &a.set).cmp(&(b.locale, &b.set)));
        Ok(infos)
    }

    fn card_count(&self, locale: Locale) -> Result<usize, CatalogError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(CARDS).map_err(storage_err)?;
        let prefix = locale_prefix(locale);

        let mut count = 0;
        for entry in table.range(prefix.as_str()..).map_err(storage_err)? {
            let (key, _value) = entry.map_err(storage_err)?;
            if !key.value().starts_with(&prefix) {
                break;
            }
            count += 1;
        }
        Ok(count)
    }

    fn guild_settings(&self, guild_id: &str) -> Result<Option<GuildSettings>, CatalogError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(GUILD_SETTINGS).map_err(storage_err)?;
        match table.get(guild_id).map_err(storage_err)? {
            Some(data) => Ok(Some(
                postcard::from_bytes(data.value()).map_err(serialization_err)?,
            )),
            None => Ok(None),
        }
    }

    fn save_guild_settings(
        &mut self,
        guild_id: &str,
        settings: &GuildSettings,
    ) -> Result<(), CatalogError> {
        let bytes = postcard::to_allocvec(settings).map_err(serialization_err)?;
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(GUILD_SETTINGS).map_err(storage_err)?;
            table
                .insert(guild_id, bytes.as_slice())
                .map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn raw(code: &str, name: &str, card_type: &str) -> Card {
        let mut card = Card::new(code, name);
        card.card_type = card_type.into();
        card
    }

    fn bundle(locale: Locale, set: &str, last_modified: u64, cards: Vec<Card>) -> SetBundle {
        SetBundle {
            locale,
            set: set.into(),
            version: "1.0.0".into(),
            last_modified,
            cards,
        }
    }

    #[test]
    fn import_and_find() {
        let temp = tempdir().expect("temp dir");
        let mut catalog = RedbCatalog::open(temp.path().join("cards.redb")).expect("open db");

        let applied = catalog
            .import_bundle(bundle(
                Locale::EnUs,
                "set1",
                5,
                vec![raw("01DE001", "Vanguard Defender", "Unit")],
            ))
            .expect("import");
        assert!(applied);

        let found = catalog
            .find_by_codes(Locale::EnUs, &["01DE001", "01DE999"])
            .expect("lookup");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].type_ref, "Unit");
        assert_eq!(catalog.card_count(Locale::EnUs).expect("count"), 1);
        assert_eq!(catalog.card_count(Locale::DeDe).expect("count"), 0);
    }

    #[test]
    fn stale_bundle_is_skipped() {
        let temp = tempdir().expect("temp dir");
        let mut catalog = RedbCatalog::open(temp.path().join("cards.redb")).expect("open db");

        catalog
            .import_bundle(bundle(Locale::EnUs, "set1", 5, vec![raw("01DE001", "A", "Unit")]))
            .expect("import");
        let applied = catalog
            .import_bundle(bundle(Locale::EnUs, "set1", 4, vec![raw("01DE002", "B", "Unit")]))
            .expect("import");

        assert!(!applied);
        assert!(
            catalog
                .find_by_codes(Locale::EnUs, &["01DE002"])
                .expect("lookup")
                .is_empty()
        );
    }

    #[test]
    fn newer_bundle_replaces_rows() {
        let temp = tempdir().expect("temp dir");
        let mut catalog = RedbCatalog::open(temp.path().join("cards.redb")).expect("open db");

        catalog
            .import_bundle(bundle(Locale::EnUs, "set1", 5, vec![raw("01DE001", "A", "Unit")]))
            .expect("import");
        catalog
            .import_bundle(bundle(Locale::EnUs, "set1", 6, vec![raw("01DE002", "B", "Unit")]))
            .expect("import");

        assert_eq!(catalog.card_count(Locale::EnUs).expect("count"), 1);
        let infos = catalog.bundles().expect("bundles");
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].last_modified, 6);
    }

    #[test]
    fn search_stays_inside_locale() {
        let temp = tempdir().expect("temp dir");
        let mut catalog = RedbCatalog::open(temp.path().join("cards.redb")).expect("open db");

        catalog
            .import_bundle(bundle(Locale::EnUs, "set1", 1, vec![raw("01NX020", "Draven", "Unit")]))
            .expect("import");
        catalog
            .import_bundle(bundle(Locale::EsEs, "set1", 1, vec![raw("01NX020", "Draven", "Unidad")]))
            .expect("import");

        let found = catalog.search_by_name(Locale::EnUs, "drav").expect("search");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].card_type, "Unit");

        let es = catalog.search_by_name(Locale::EsEs, "DRAV").expect("search");
        assert_eq!(es[0].type_ref, "Unit");
    }

    #[test]
    fn english_import_updates_translations() {
        let temp = tempdir().expect("temp dir");
        let mut catalog = RedbCatalog::open(temp.path().join("cards.redb")).expect("open db");

        catalog
            .import_bundle(bundle(Locale::FrFr, "set1", 1, vec![raw("01FR001", "Anivia", "Unité")]))
            .expect("import");
        catalog
            .import_bundle(bundle(Locale::EnUs, "set1", 1, vec![raw("01FR001", "Anivia", "Unit")]))
            .expect("import");

        let fr = catalog.find_by_codes(Locale::FrFr, &["01FR001"]).expect("lookup");
        assert_eq!(fr[0].type_ref, "Unit");
    }

    #[test]
    fn persists_across_reopen() {
        let temp = tempdir().expect("temp dir");
        let db_path = temp.path().join("cards.redb");

        {
            let mut catalog = RedbCatalog::open(&db_path).expect("open db");
            catalog
                .import_bundle(bundle(Locale::EnUs, "set1", 1, vec![raw("01DE001", "A", "Unit")]))
                .expect("import");
            catalog
                .save_guild_settings(
                    "7",
                    &GuildSettings {
                        locale: Some(Locale::JaJp),
                        viewer: None,
                    },
                )
                .expect("save");
        }

        {
            let catalog = RedbCatalog::open(&db_path).expect("open db");
            assert_eq!(catalog.card_count(Locale::EnUs).expect("count"), 1);
            let settings = catalog.guild_settings("7").expect("read").expect("present");
            assert_eq!(settings.locale, Some(Locale::JaJp));
            assert!(catalog.guild_settings("8").expect("read").is_none());
        }
    }
}
