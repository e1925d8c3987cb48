//! # Card Info
//!
//! Detail lookup for a single card. A champion unit is shown together with
//! its other levels.

use crate::catalog::CardCatalog;
use crate::locale::Locale;
use crate::{Card, ScoutError};
use serde::Serialize;

/// Cards to display for one lookup, ordered by card code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardDetails {
    /// Code that was asked for.
    pub requested: String,
    pub cards: Vec<Card>,
}

impl CardDetails {
    /// The requested card itself.
    #[must_use]
    pub fn card(&self) -> Option<&Card> {
        self.cards.iter().find(|c| c.card_code == self.requested)
    }
}

/// Look up `code` and, for champion units, the associated champion units.
pub fn card_details<C>(catalog: &C, locale: Locale, code: &str) -> Result<CardDetails, ScoutError>
where
    C: CardCatalog + ?Sized,
{
    let code = code.trim();
    let card = catalog
        .find_by_codes(locale, &[code])?
        .into_iter()
        .next()
        .ok_or_else(|| ScoutError::CardNotFound(code.to_string()))?;

    let mut cards = Vec::new();
    if card.is_champion_unit() && !card.associated_card_refs.is_empty() {
        let refs: Vec<&str> = card
            .associated_card_refs
            .iter()
            .map(String::as_str)
            .filter(|r| *r != card.card_code)
            .collect();
        cards.extend(
            catalog
                .find_by_codes(locale, &refs)?
                .into_iter()
                .filter(Card::is_champion_unit),
        );
    }
    cards.push(card);
    cards.sort_by(|a, b| a.card_code.cmp(&b.card_code));

    Ok(CardDetails {
        requested: code.to_string(),
        cards,
    })
}
