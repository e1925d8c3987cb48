//! # Presentation
//!
//! Turns classified decks and card details into embed-shaped JSON: a title,
//! a list of named fields, and link buttons. Chat front-ends and the HTTP API
//! both consume this shape.

use scout_core::regions::short_for_reference;
use scout_core::{Card, Categories, DeckEntry, DeckViewer, Locale, Localizer};
use serde::{Deserialize, Serialize};

/// Maximum deck lines in one field before a continuation field starts.
pub const MAX_LINES_PER_FIELD: usize = 10;

/// Title of a continuation field (U+3164, renders blank but is not empty).
pub const CONTINUATION_TITLE: &str = "\u{3164}";

// =============================================================================
// OUTPUT SHAPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            inline: true,
            ..Self::new(name, value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkButton {
    pub label: String,
    pub url: String,
}

// =============================================================================
// DECKS
// =============================================================================

/// Render `n` with full-width digits (`12` -> `１２`).
pub fn widen_digits(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0xFF10 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Region tags of a card, e.g. `[NX][DE]`.
pub fn region_tags(card: &Card) -> String {
    card.region_refs
        .iter()
        .map(|r| format!("[{}]", short_for_reference(r)))
        .collect()
}

/// One deck line: `**２** [NX] (1) Annie`.
pub fn entry_line(entry: &DeckEntry) -> String {
    let tags = region_tags(&entry.card);
    let count = widen_digits(entry.count);
    if tags.is_empty() {
        format!("**{}** ({}) {}", count, entry.card.cost, entry.card.name)
    } else {
        format!(
            "**{}** {} ({}) {}",
            count, tags, entry.card.cost, entry.card.name
        )
    }
}

/// Fields for every non-empty bucket, in display order.
///
/// A bucket longer than `MAX_LINES_PER_FIELD` continues in extra fields
/// titled `CONTINUATION_TITLE`.
pub fn deck_fields(categories: &Categories, locale: Locale, localizer: &Localizer) -> Vec<EmbedField> {
    let mut fields = Vec::new();
    for (category, entries) in categories.buckets() {
        let lines: Vec<String> = entries.iter().map(entry_line).collect();
        for (i, chunk) in lines.chunks(MAX_LINES_PER_FIELD).enumerate() {
            let name = if i == 0 {
                localizer.localize(locale, category.label())
            } else {
                CONTINUATION_TITLE
            };
            fields.push(EmbedField::inline(name, chunk.join("\n")));
        }
    }
    fields
}

/// Embed for a decoded deck, titled with its code.
pub fn deck_embed(
    code: &str,
    categories: &Categories,
    locale: Locale,
    localizer: &Localizer,
) -> Embed {
    Embed {
        title: Some(code.to_string()),
        fields: deck_fields(categories, locale, localizer),
        ..Embed::default()
    }
}

/// "View on <site>" button for a deck code.
pub fn viewer_button(
    viewer: &DeckViewer,
    code: &str,
    locale: Locale,
    localizer: &Localizer,
) -> LinkButton {
    LinkButton {
        label: format!("{} {}", localizer.localize(locale, "View on"), viewer.label()),
        url: viewer.url_for(code),
    }
}

// =============================================================================
// CARDS
// =============================================================================

/// Embed describing a single card.
pub fn card_embed(card: &Card, locale: Locale, localizer: &Localizer) -> Embed {
    let t = |key: &'static str| localizer.localize(locale, key);
    let mut fields = vec![EmbedField::inline(t("Type"), card.card_type.clone())];

    if card.type_ref == "Unit" || card.type_ref == "Equipment" {
        fields.push(EmbedField::inline(t("Attack"), card.attack.to_string()));
        fields.push(EmbedField::inline(t("Health"), card.health.to_string()));
    }
    if !card.keywords.is_empty() {
        fields.push(EmbedField::inline(t("Keywords"), card.keywords.join("\n")));
    }
    if !card.rarity_ref.is_empty() && card.rarity_ref != "None" {
        fields.push(EmbedField::inline(t("Rarity"), card.rarity.clone()));
    }
    if !card.description_raw.is_empty() {
        fields.push(EmbedField::new(t("Description"), card.description_raw.clone()));
    }
    if !card.levelup_description_raw.is_empty() {
        fields.push(EmbedField::new(
            t("Level Up"),
            card.levelup_description_raw.clone(),
        ));
    }
    if !card.flavor_text.is_empty() {
        let flavor: Vec<String> = card
            .flavor_text
            .lines()
            .map(|line| format!("> _{line}_"))
            .collect();
        fields.push(EmbedField::new("", flavor.join("\n")));
    }
    if card.collectible && !card.formats.is_empty() {
        fields.push(EmbedField::inline(t("Formats"), card.formats.join(", ")));
    }

    let asset = card.assets.first();
    Embed {
        title: None,
        description: Some(format!(
            "{}({}) **{}**",
            region_tags(card),
            card.cost,
            card.name
        )),
        fields,
        image: asset.map(|a| a.full_absolute_path.clone()),
        thumbnail: asset.map(|a| a.game_absolute_path.clone()),
        footer: (!card.artist_name.is_empty()).then(|| format!("🎨 {}", card.artist_name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::{Deck, classify};

    fn localizer() -> Localizer {
        Localizer::embedded().expect("embedded messages")
    }

    fn unit(code: &str, name: &str, cost: u32) -> Card {
        Card::new(code, name)
            .with_cost(cost)
            .with_type("Unit")
            .with_rarity("Common")
            .with_regions(["Noxus"])
    }

    #[test]
    fn digits_are_full_width() {
        assert_eq!(widen_digits(3), "３");
        assert_eq!(widen_digits(10), "１０");
    }

    #[test]
    fn line_shows_count_regions_cost_and_name() {
        let entry = DeckEntry::new(unit("01NX001", "Legion Rearguard", 1), 3);
        assert_eq!(entry_line(&entry), "**３** [NX] (1) Legion Rearguard");
    }

    #[test]
    fn long_buckets_continue_in_blank_fields() {
        let entries: Vec<_> = (0..12)
            .map(|i| DeckEntry::new(unit(&format!("01NX{i:03}"), &format!("Unit {i:02}"), 1), 1))
            .collect();
        let categories = classify(&Deck::new(entries, vec![]));

        let fields = deck_fields(&categories, Locale::EnUs, &localizer());
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Followers");
        assert_eq!(fields[0].value.lines().count(), 10);
        assert_eq!(fields[1].name, CONTINUATION_TITLE);
        assert_eq!(fields[1].value.lines().count(), 2);
        assert!(fields.iter().all(|f| f.inline));
    }

    #[test]
    fn bucket_titles_are_localized() {
        let deck = Deck::new(vec![DeckEntry::new(unit("01NX001", "A", 1), 1)], vec![]);
        let fields = deck_fields(&classify(&deck), Locale::PtBr, &localizer());
        assert_eq!(fields[0].name, "Seguidores");
    }

    #[test]
    fn viewer_button_links_the_code() {
        let button = viewer_button(&DeckViewer::default(), "ABC", Locale::EnUs, &localizer());
        assert_eq!(button.label, "View on Runeterra AR");
        assert_eq!(button.url, "https://runeterra.ar/decks/code/ABC");
    }

    #[test]
    fn spell_embed_has_no_stats() {
        let mut card = Card::new("01NX043", "Blade's Edge")
            .with_cost(1)
            .with_type("Spell")
            .with_rarity("Common");
        card.collectible = true;
        card.formats = vec!["Standard".into()];
        card.flavor_text = "Sharp.".into();

        let embed = card_embed(&card, Locale::EnUs, &localizer());
        let names: Vec<_> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Type", "Rarity", "", "Formats"]);
        assert_eq!(embed.fields[2].value, "> _Sharp._");
        assert_eq!(embed.description.as_deref(), Some("(1) **Blade's Edge**"));
    }
}
