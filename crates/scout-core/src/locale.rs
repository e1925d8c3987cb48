//! # Locales
//!
//! The fixed set of catalog locales. Each locale has its own copy of every
//! card and its own message file.

use crate::ScoutError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A supported catalog / UI locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    DeDe,
    #[default]
    EnUs,
    EsEs,
    EsMx,
    FrFr,
    ItIt,
    JaJp,
    KoKr,
    PlPl,
    PtBr,
    RuRu,
    ThTh,
    TrTr,
    ViVn,
    ZhTw,
}

impl Locale {
    pub const ALL: [Locale; 15] = [
        Locale::DeDe,
        Locale::EnUs,
        Locale::EsEs,
        Locale::EsMx,
        Locale::FrFr,
        Locale::ItIt,
        Locale::JaJp,
        Locale::KoKr,
        Locale::PlPl,
        Locale::PtBr,
        Locale::RuRu,
        Locale::ThTh,
        Locale::TrTr,
        Locale::ViVn,
        Locale::ZhTw,
    ];

    /// Catalog identifier, e.g. `en_us`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::DeDe => "de_de",
            Locale::EnUs => "en_us",
            Locale::EsEs => "es_es",
            Locale::EsMx => "es_mx",
            Locale::FrFr => "fr_fr",
            Locale::ItIt => "it_it",
            Locale::JaJp => "ja_jp",
            Locale::KoKr => "ko_kr",
            Locale::PlPl => "pl_pl",
            Locale::PtBr => "pt_br",
            Locale::RuRu => "ru_ru",
            Locale::ThTh => "th_th",
            Locale::TrTr => "tr_tr",
            Locale::ViVn => "vi_vn",
            Locale::ZhTw => "zh_tw",
        }
    }

    /// Native display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Locale::DeDe => "Deutsch",
            Locale::EnUs => "English",
            Locale::EsEs => "Español (EUW)",
            Locale::EsMx => "Español (LATAM)",
            Locale::FrFr => "Français",
            Locale::ItIt => "Italiano",
            Locale::JaJp => "日本語",
            Locale::KoKr => "한국어",
            Locale::PlPl => "Polski",
            Locale::PtBr => "Português",
            Locale::RuRu => "Русский",
            Locale::ThTh => "ภาษาไทย",
            Locale::TrTr => "Türkçe",
            Locale::ViVn => "Tiếng Việt",
            Locale::ZhTw => "繁體中文",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ScoutError;

    /// Case-insensitive; `en-US` and `en_us` are equivalent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == wanted)
            .ok_or_else(|| ScoutError::UnknownLocale(s.to_string()))
    }
}
