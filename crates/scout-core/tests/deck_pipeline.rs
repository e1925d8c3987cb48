//! # Deck Pipeline Tests
//!
//! End-to-end checks of decode -> resolve -> classify against an in-memory
//! catalog.
//!
//! ## Stages
//! - Codec: known deck codes
//! - Resolver: ordering and unresolved codes
//! - Classifier: bucket contents

use scout_core::{
    Card, Category, DeckCodeEntry, Locale, MemoryCatalog, ScoutError, classify, decode,
    decode_deck, encode, resolve,
};

fn annie() -> Card {
    Card::new("06NX012", "Annie")
        .with_cost(1)
        .with_type("Unit")
        .with_rarity("Champion")
        .with_regions(["Noxus"])
}

fn ravenbloom() -> Card {
    Card::new("06NX028", "Ravenbloom Conservatory")
        .with_cost(1)
        .with_type("Landmark")
        .with_rarity("Rare")
}

fn ballista() -> Card {
    Card::new("06NX020", "The Darkin Ballista")
        .with_cost(1)
        .with_type("Equipment")
        .with_rarity("Epic")
}

fn pigeon() -> Card {
    Card::new("06NX041", "Crimson Pigeon")
        .with_cost(1)
        .with_type("Unit")
        .with_rarity("Common")
}

fn blades_edge() -> Card {
    Card::new("01NX043", "Blade's Edge")
        .with_cost(1)
        .with_type("Spell")
        .with_rarity("Common")
}

fn catalog() -> MemoryCatalog {
    MemoryCatalog::with_cards(
        Locale::EnUs,
        [annie(), ravenbloom(), ballista(), pigeon(), blades_edge()],
    )
}

// =============================================================================
// CODEC
// =============================================================================

mod codec {
    use super::*;

    #[test]
    fn empty_code_reports_header_read() {
        let err = decode("").expect_err("empty code");
        assert_eq!(
            err.to_string(),
            "failed to read format and version: unexpected end of input"
        );
    }

    #[test]
    fn encoded_deck_decodes_through_the_pipeline() {
        let code = encode(&[
            DeckCodeEntry::new("06NX012", 3),
            DeckCodeEntry::new("01NX043", 2),
        ])
        .expect("encode");

        let deck = decode_deck(&catalog(), Locale::EnUs, &code).expect("decode");
        assert_eq!(deck.card_count(), 5);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode_deck(&catalog(), Locale::EnUs, "!!!!").expect_err("garbage");
        assert!(matches!(err, ScoutError::Decode(_)));
    }
}

// =============================================================================
// RESOLVER
// =============================================================================

mod resolver {
    use super::*;

    /// Five cards of equal cost come back sorted by name.
    #[test]
    fn equal_cost_sorts_by_name() {
        let raw = [
            DeckCodeEntry::new("06NX012", 1),
            DeckCodeEntry::new("06NX028", 1),
            DeckCodeEntry::new("06NX020", 1),
            DeckCodeEntry::new("06NX041", 1),
            DeckCodeEntry::new("01NX043", 1),
        ];
        let deck = resolve(&catalog(), Locale::EnUs, &raw).expect("resolve");
        let names: Vec<_> = deck.iter().map(|e| e.card.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Annie",
                "Blade's Edge",
                "Crimson Pigeon",
                "Ravenbloom Conservatory",
                "The Darkin Ballista",
            ]
        );
    }

    /// A code missing from the catalog is left out of the deck and reported.
    #[test]
    fn unknown_code_is_omitted() {
        let raw = [
            DeckCodeEntry::new("06NX012", 2),
            DeckCodeEntry::new("99XX999", 3),
        ];
        let deck = resolve(&catalog(), Locale::EnUs, &raw).expect("resolve");

        assert_eq!(deck.len(), 1);
        assert_eq!(deck.entries()[0].card.card_code, "06NX012");
        assert_eq!(deck.unresolved(), &[DeckCodeEntry::new("99XX999", 3)]);
    }

    #[test]
    fn other_locale_without_cards_resolves_nothing() {
        let raw = [DeckCodeEntry::new("06NX012", 2)];
        let deck = resolve(&catalog(), Locale::JaJp, &raw).expect("resolve");
        assert!(deck.is_empty());
        assert_eq!(deck.unresolved().len(), 1);
    }
}

// =============================================================================
// CLASSIFIER
// =============================================================================

mod classifier {
    use super::*;

    #[test]
    fn one_card_per_category() {
        let raw = [
            DeckCodeEntry::new("06NX012", 1),
            DeckCodeEntry::new("06NX028", 1),
            DeckCodeEntry::new("06NX020", 1),
            DeckCodeEntry::new("06NX041", 1),
            DeckCodeEntry::new("01NX043", 1),
        ];
        let deck = resolve(&catalog(), Locale::EnUs, &raw).expect("resolve");
        let categories = classify(&deck);

        let bucket = |c: Category| -> Vec<&str> {
            categories
                .get(c)
                .unwrap_or_default()
                .iter()
                .map(|e| e.card.card_code.as_str())
                .collect()
        };
        assert_eq!(categories.len(), 5);
        assert_eq!(bucket(Category::Champion), vec!["06NX012"]);
        assert_eq!(bucket(Category::Follower), vec!["06NX041"]);
        assert_eq!(bucket(Category::Spell), vec!["01NX043"]);
        assert_eq!(bucket(Category::Landmark), vec!["06NX028"]);
        assert_eq!(bucket(Category::Equipment), vec!["06NX020"]);
        assert!(categories.uncategorized().is_empty());
    }

    /// Eleven entries of the same champion stay eleven, in order.
    #[test]
    fn repeated_champion_keeps_every_entry() {
        let raw: Vec<_> = (1..=11).map(|n| DeckCodeEntry::new("06NX012", n)).collect();
        let deck = resolve(&catalog(), Locale::EnUs, &raw).expect("resolve");
        assert_eq!(deck.len(), 11);

        let categories = classify(&deck);
        assert_eq!(categories.len(), 1);
        let champions = categories.get(Category::Champion).expect("champions");
        let counts: Vec<_> = champions.iter().map(|e| e.count).collect();
        assert_eq!(counts, (1..=11).collect::<Vec<_>>());
    }
}
