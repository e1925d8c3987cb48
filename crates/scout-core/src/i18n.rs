//! # Localization
//!
//! Read-only message table keyed by `(locale, message key)`. Built once at
//! startup from the TOML files embedded at compile time and passed to whoever
//! needs localized text.

use crate::ScoutError;
use crate::locale::Locale;
use std::collections::BTreeMap;

const EMBEDDED: [(Locale, &str); 15] = [
    (Locale::DeDe, include_str!("../locales/messages.de_de.toml")),
    (Locale::EnUs, include_str!("../locales/messages.en_us.toml")),
    (Locale::EsEs, include_str!("../locales/messages.es_es.toml")),
    (Locale::EsMx, include_str!("../locales/messages.es_mx.toml")),
    (Locale::FrFr, include_str!("../locales/messages.fr_fr.toml")),
    (Locale::ItIt, include_str!("../locales/messages.it_it.toml")),
    (Locale::JaJp, include_str!("../locales/messages.ja_jp.toml")),
    (Locale::KoKr, include_str!("../locales/messages.ko_kr.toml")),
    (Locale::PlPl, include_str!("../locales/messages.pl_pl.toml")),
    (Locale::PtBr, include_str!("../locales/messages.pt_br.toml")),
    (Locale::RuRu, include_str!("../locales/messages.ru_ru.toml")),
    (Locale::ThTh, include_str!("../locales/messages.th_th.toml")),
    (Locale::TrTr, include_str!("../locales/messages.tr_tr.toml")),
    (Locale::ViVn, include_str!("../locales/messages.vi_vn.toml")),
    (Locale::ZhTw, include_str!("../locales/messages.zh_tw.toml")),
];

/// Localized message lookup.
///
/// Falls back to `en_us`, then to the key itself.
#[derive(Debug, Clone, Default)]
pub struct Localizer {
    messages: BTreeMap<Locale, BTreeMap<String, String>>,
}

impl Localizer {
    /// Load the message files shipped with the crate.
    pub fn embedded() -> Result<Self, ScoutError> {
        Self::from_sources(EMBEDDED)
    }

    /// Build from `(locale, TOML text)` pairs. Each file is a flat table of
    /// string keys to string values.
    pub fn from_sources<'a, I>(sources: I) -> Result<Self, ScoutError>
    where
        I: IntoIterator<Item = (Locale, &'a str)>,
    {
        let mut messages = BTreeMap::new();
        for (locale, text) in sources {
            let table: BTreeMap<String, String> = toml::from_str(text)
                .map_err(|e| ScoutError::Parse(format!("messages.{locale}.toml: {e}")))?;
            messages.insert(locale, table);
        }
        Ok(Self { messages })
    }

    /// Message `key` in `locale`.
    #[must_use]
    pub fn localize<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.lookup(locale, key)
            .or_else(|| self.lookup(Locale::EnUs, key))
            .unwrap_or(key)
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.messages
            .get(&locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Locales with a loaded message file.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.messages.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;

    #[test]
    fn embedded_files_cover_every_locale() {
        let localizer = Localizer::embedded().expect("embedded messages");
        assert_eq!(localizer.locales().count(), Locale::ALL.len());
    }

    #[test]
    fn every_locale_translates_every_category() {
        let localizer = Localizer::embedded().expect("embedded messages");
        for locale in Locale::ALL {
            for category in Category::DISPLAY_ORDER {
                assert!(
                    localizer.lookup(locale, category.label()).is_some(),
                    "{locale} lacks {category}"
                );
            }
        }
    }

    #[test]
    fn translated_lookup() {
        let localizer = Localizer::embedded().expect("embedded messages");
        assert_eq!(localizer.localize(Locale::PtBr, "Champions"), "Campeões");
        assert_eq!(localizer.localize(Locale::EnUs, "Level Up"), "Level Up");
    }

    #[test]
    fn falls_back_to_english_then_key() {
        let localizer = Localizer::from_sources([
            (Locale::EnUs, "Spells = \"Spells\"\nOnly = \"English only\""),
            (Locale::FrFr, "Spells = \"Sorts\""),
        ])
        .expect("parse");
        assert_eq!(localizer.localize(Locale::FrFr, "Spells"), "Sorts");
        assert_eq!(localizer.localize(Locale::FrFr, "Only"), "English only");
        assert_eq!(localizer.localize(Locale::FrFr, "Missing"), "Missing");
        assert_eq!(localizer.localize(Locale::KoKr, "Spells"), "Spells");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let result = Localizer::from_sources([(Locale::EnUs, "not = [valid")]);
        assert!(matches!(result, Err(ScoutError::Parse(msg)) if msg.contains("en_us")));
    }
}
