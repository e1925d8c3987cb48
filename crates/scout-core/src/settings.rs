//! # Guild Settings
//!
//! Per-guild preferences: the default output locale and the website used to
//! view a deck.

use crate::ScoutError;
use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the deck code in a viewer template.
pub const CODE_PLACEHOLDER: &str = "{{code}}";

pub const DEFAULT_VIEWER_TEMPLATE: &str = "https://runeterra.ar/decks/code/{{code}}";
pub const DEFAULT_VIEWER_LABEL: &str = "Runeterra AR";

/// Deck used to preview a viewer template before it is saved.
pub const SAMPLE_DECK_CODE: &str =
    "CEDACAIFAEAQMAJJAEEAABQCA4CQCAQDAEAQWKRUAMEACAICBQBQCAIFB4AQMBJAAEDQKCQBAEAQCFA";

/// A deck viewer website: URL template plus the label shown on the link.
///
/// Deserialization goes through `DeckViewer::new`, so stored or submitted
/// viewers are validated like constructed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDeckViewer")]
pub struct DeckViewer {
    template: String,
    label: String,
}

#[derive(Deserialize)]
struct RawDeckViewer {
    template: String,
    label: String,
}

impl TryFrom<RawDeckViewer> for DeckViewer {
    type Error = ScoutError;

    fn try_from(raw: RawDeckViewer) -> Result<Self, Self::Error> {
        Self::new(raw.template, raw.label)
    }
}

impl DeckViewer {
    /// Validate and build a viewer.
    ///
    /// The template must be an `http` or `https` URL with a host. The
    /// `{{code}}` placeholder is optional; without it every deck links to the
    /// same page.
    pub fn new(template: impl Into<String>, label: impl Into<String>) -> Result<Self, ScoutError> {
        let template = template.into().trim().to_string();
        let label = label.into().trim().to_string();

        let rest = template
            .strip_prefix("https://")
            .or_else(|| template.strip_prefix("http://"))
            .ok_or_else(|| ScoutError::InvalidTemplate(format!("not an http(s) URL: {template}")))?;
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return Err(ScoutError::InvalidTemplate(format!(
                "missing host: {template}"
            )));
        }
        if label.is_empty() {
            return Err(ScoutError::InvalidTemplate("empty label".to_string()));
        }

        Ok(Self { template, label })
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// URL of `code` on this viewer.
    #[must_use]
    pub fn url_for(&self, code: &str) -> String {
        self.template.replacen(CODE_PLACEHOLDER, code, 1)
    }

    /// URL of the sample deck, shown when a guild configures a new viewer.
    #[must_use]
    pub fn preview_url(&self) -> String {
        self.url_for(SAMPLE_DECK_CODE)
    }
}

impl Default for DeckViewer {
    fn default() -> Self {
        Self {
            template: DEFAULT_VIEWER_TEMPLATE.to_string(),
            label: DEFAULT_VIEWER_LABEL.to_string(),
        }
    }
}

/// Stored preferences of one guild.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuildSettings {
    pub locale: Option<Locale>,
    pub viewer: Option<DeckViewer>,
}

impl GuildSettings {
    /// Locale to use when a request does not name one.
    #[must_use]
    pub fn effective_locale(&self) -> Locale {
        self.locale.unwrap_or_default()
    }

    #[must_use]
    pub fn effective_viewer(&self) -> DeckViewer {
        self.viewer.clone().unwrap_or_default()
    }
}
