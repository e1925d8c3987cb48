//! Set bundles: one Data Dragon set for one locale.

use crate::locale::Locale;
use crate::{Card, ScoutError};
use serde::{Deserialize, Serialize};

/// All cards of one set in one locale, as published by Data Dragon
/// (`set1-en_us.json`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetBundle {
    pub locale: Locale,
    pub set: String,
    pub version: String,
    /// Publication time, seconds since the Unix epoch.
    pub last_modified: u64,
    pub cards: Vec<Card>,
}

impl SetBundle {
    /// Parse the JSON card array of a set bundle.
    pub fn from_json(
        locale: Locale,
        set: impl Into<String>,
        version: impl Into<String>,
        last_modified: u64,
        json: &[u8],
    ) -> Result<Self, ScoutError> {
        let cards: Vec<Card> =
            serde_json::from_slice(json).map_err(|e| ScoutError::Parse(e.to_string()))?;
        Ok(Self {
            locale,
            set: set.into(),
            version: version.into(),
            last_modified,
            cards,
        })
    }

    #[must_use]
    pub fn info(&self) -> BundleInfo {
        BundleInfo {
            locale: self.locale,
            set: self.set.clone(),
            version: self.version.clone(),
            last_modified: self.last_modified,
            card_count: self.cards.len(),
        }
    }
}

/// Stored metadata of an imported bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleInfo {
    pub locale: Locale,
    pub set: String,
    pub version: String,
    pub last_modified: u64,
    pub card_count: usize,
}

/// Split a Data Dragon file name such as `set6cde-pt_br.json` into set and
/// locale.
pub fn parse_bundle_file_name(file_name: &str) -> Result<(String, Locale), ScoutError> {
    let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
    let (set, locale) = stem
        .rsplit_once('-')
        .ok_or_else(|| ScoutError::Parse(format!("not a set bundle file name: {file_name}")))?;
    if set.is_empty() {
        return Err(ScoutError::Parse(format!(
            "not a set bundle file name: {file_name}"
        )));
    }
    Ok((set.to_string(), locale.parse()?))
}
