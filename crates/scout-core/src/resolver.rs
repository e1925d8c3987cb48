//! # Deck Resolver
//!
//! Joins decoded `(code, count)` pairs against the card catalog and sorts the
//! result into display order.
//!
//! One batched catalog call per resolve. Codes the catalog does not know are
//! omitted from the deck and listed in `Deck::unresolved`; a catalog failure
//! aborts the whole resolve with no partial result.

use crate::catalog::CardCatalog;
use crate::codec;
use crate::locale::Locale;
use crate::{Card, CatalogError, Deck, DeckCodeEntry, DeckEntry, ScoutError};
use std::collections::{BTreeMap, BTreeSet};

/// Resolve decoded entries for `locale`.
///
/// Every input entry yields at most one output entry, so repeated codes stay
/// repeated.
pub fn resolve<C>(catalog: &C, locale: Locale, raw: &[DeckCodeEntry]) -> Result<Deck, CatalogError>
where
    C: CardCatalog + ?Sized,
{
    let codes: Vec<&str> = raw
        .iter()
        .map(|e| e.card_code.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let found: BTreeMap<String, Card> = catalog
        .find_by_codes(locale, &codes)?
        .into_iter()
        .map(|card| (card.card_code.clone(), card))
        .collect();

    let mut entries = Vec::with_capacity(raw.len());
    let mut unresolved = Vec::new();
    for entry in raw {
        match found.get(&entry.card_code) {
            Some(card) => entries.push(DeckEntry::new(card.clone(), entry.count)),
            None => unresolved.push(entry.clone()),
        }
    }

    Ok(Deck::new(entries, unresolved))
}

/// Decode `code` and resolve it in one step.
pub fn decode_deck<C>(catalog: &C, locale: Locale, code: &str) -> Result<Deck, ScoutError>
where
    C: CardCatalog + ?Sized,
{
    let raw = codec::decode(code)?;
    Ok(resolve(catalog, locale, &raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use std::cell::Cell;

    struct CountingCatalog {
        inner: MemoryCatalog,
        calls: Cell<usize>,
    }

    impl CardCatalog for CountingCatalog {
        fn find_by_codes(&self, locale: Locale, codes: &[&str]) -> Result<Vec<Card>, CatalogError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.find_by_codes(locale, codes)
        }

        fn search_by_name(&self, locale: Locale, query: &str) -> Result<Vec<Card>, CatalogError> {
            self.inner.search_by_name(locale, query)
        }
    }

    struct FailingCatalog;

    impl CardCatalog for FailingCatalog {
        fn find_by_codes(&self, _: Locale, _: &[&str]) -> Result<Vec<Card>, CatalogError> {
            Err(CatalogError::Storage("fatal error".into()))
        }

        fn search_by_name(&self, _: Locale, _: &str) -> Result<Vec<Card>, CatalogError> {
            Err(CatalogError::Storage("fatal error".into()))
        }
    }

    #[test]
    fn one_batched_lookup_per_resolve() {
        let catalog = CountingCatalog {
            inner: MemoryCatalog::with_cards(
                Locale::EnUs,
                [
                    Card::new("01DE001", "A").with_cost(2),
                    Card::new("01DE002", "B").with_cost(1),
                ],
            ),
            calls: Cell::new(0),
        };
        let raw = [
            DeckCodeEntry::new("01DE001", 3),
            DeckCodeEntry::new("01DE002", 2),
            DeckCodeEntry::new("01DE001", 1),
        ];

        let deck = resolve(&catalog, Locale::EnUs, &raw).expect("resolve");
        assert_eq!(catalog.calls.get(), 1);
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.entries()[0].card.name, "B");
    }

    #[test]
    fn empty_input_still_returns_empty_deck() {
        let catalog = MemoryCatalog::new();
        let deck = resolve(&catalog, Locale::EnUs, &[]).expect("resolve");
        assert!(deck.is_empty());
        assert!(deck.unresolved().is_empty());
    }

    #[test]
    fn catalog_failure_is_propagated() {
        let err = resolve(&FailingCatalog, Locale::EnUs, &[DeckCodeEntry::new("01DE001", 1)])
            .expect_err("must fail");
        assert_eq!(err, CatalogError::Storage("fatal error".into()));
    }

    #[test]
    fn decode_deck_wraps_errors() {
        let err = decode_deck(&FailingCatalog, Locale::EnUs, "CEAAAAICAYBQYHA").expect_err("fail");
        assert_eq!(err.to_string(), "failed to find cards: storage error: fatal error");

        let err = decode_deck(&MemoryCatalog::new(), Locale::EnUs, "").expect_err("fail");
        assert!(err.to_string().starts_with("failed to decode deck: failed to read format and version"));
    }
}
