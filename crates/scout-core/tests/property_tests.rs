//! # Property-Based Tests
//!
//! Codec round-trip, resolver order independence and classifier completeness.

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use scout_core::{
    Card, Category, DeckCodeEntry, Locale, MemoryCatalog, Region, classify, decode, encode,
    resolve,
};
use std::collections::BTreeMap;

// =============================================================================
// STRATEGIES
// =============================================================================

fn card_code() -> impl Strategy<Value = String> {
    (1u64..=9, 0usize..Region::ALL.len(), 1u64..=120).prop_map(|(set, region, number)| {
        format!("{set:02}{}{number:03}", Region::ALL[region].short())
    })
}

/// A deck as a map so codes are unique, like a real deck code.
fn deck_entries() -> impl Strategy<Value = BTreeMap<String, u32>> {
    btree_map(card_code(), 1u32..=6, 0..40)
}

fn card_type() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("Unit", "Champion")),
        Just(("Unit", "Common")),
        Just(("Spell", "Rare")),
        Just(("Landmark", "Epic")),
        Just(("Equipment", "Common")),
        Just(("Ability", "None")),
    ]
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Decoding an encoded deck gives back the same multiset of entries.
    #[test]
    fn codec_round_trip(deck in deck_entries()) {
        let entries: Vec<_> = deck
            .iter()
            .map(|(code, count)| DeckCodeEntry::new(code.clone(), *count))
            .collect();

        let code = encode(&entries).expect("encode");
        let mut decoded = decode(&code).expect("decode");
        decoded.sort();

        let mut expected = entries;
        expected.sort();
        prop_assert_eq!(decoded, expected);
    }

    /// Input order never changes the encoded text.
    #[test]
    fn encode_ignores_input_order(deck in deck_entries()) {
        let entries: Vec<_> = deck
            .iter()
            .map(|(code, count)| DeckCodeEntry::new(code.clone(), *count))
            .collect();
        let mut reversed = entries.clone();
        reversed.reverse();

        prop_assert_eq!(encode(&entries).expect("encode"), encode(&reversed).expect("encode"));
    }

    /// Every permutation of the raw entries resolves to the same deck, even
    /// when several codes share a name and cost.
    #[test]
    fn resolve_is_order_independent(
        cards in btree_map(card_code(), (0u32..3, "[A-C]"), 1..20),
        rotation in 0usize..20,
    ) {
        let catalog = MemoryCatalog::with_cards(
            Locale::EnUs,
            cards
                .iter()
                .map(|(code, (cost, name))| Card::new(code.clone(), name.clone()).with_cost(*cost)),
        );
        let raw: Vec<_> = cards
            .keys()
            .enumerate()
            .map(|(i, code)| DeckCodeEntry::new(code.clone(), 1 + (i as u32 % 3)))
            .collect();

        let mut rotated = raw.clone();
        rotated.rotate_left(rotation % raw.len());
        let mut reversed = raw.clone();
        reversed.reverse();

        let base = resolve(&catalog, Locale::EnUs, &raw).expect("resolve");
        let keys: Vec<_> = base
            .iter()
            .map(|e| (e.card.cost, e.card.name.clone(), e.card.card_code.clone()))
            .collect();
        let mut sorted_keys = keys.clone();
        sorted_keys.sort();
        prop_assert_eq!(keys, sorted_keys);

        for permuted in [rotated, reversed] {
            let other = resolve(&catalog, Locale::EnUs, &permuted).expect("resolve");
            prop_assert_eq!(other.entries(), base.entries());
        }
    }

    /// Buckets plus uncategorized hold every deck entry exactly once.
    #[test]
    fn classify_keeps_every_entry_once(types in vec(card_type(), 0..40)) {
        let cards: Vec<_> = types
            .iter()
            .enumerate()
            .map(|(i, (type_ref, rarity_ref))| {
                Card::new(format!("01DE{i:03}"), format!("Card {i:02}"))
                    .with_type(*type_ref)
                    .with_rarity(*rarity_ref)
            })
            .collect();
        let raw: Vec<_> = cards.iter().map(|c| DeckCodeEntry::new(c.card_code.clone(), 1)).collect();
        let catalog = MemoryCatalog::with_cards(Locale::EnUs, cards);
        let deck = resolve(&catalog, Locale::EnUs, &raw).expect("resolve");

        let categories = classify(&deck);
        let mut seen: Vec<String> = categories
            .buckets()
            .flat_map(|(_, entries)| entries.iter().map(|e| e.card.card_code.clone()))
            .chain(categories.uncategorized().iter().map(|e| e.card.card_code.clone()))
            .collect();
        seen.sort();
        let mut expected: Vec<_> = deck.iter().map(|e| e.card.card_code.clone()).collect();
        expected.sort();
        prop_assert_eq!(seen, expected);

        for (category, entries) in categories.buckets() {
            prop_assert!(!entries.is_empty());
            prop_assert!(entries.iter().all(|e| Category::of(&e.card) == Some(category)));
        }
    }
}
