//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use super::options::CommandOptions;
use crate::render::{Embed, LinkButton};
use scout_core::{BundleInfo, Card, DeckCodeEntry, DeckEntry, GuildSettings, Locale};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Catalog status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub persistent: bool,
    /// Card count per locale, locales without cards omitted.
    pub cards: BTreeMap<Locale, usize>,
    pub bundles: Vec<BundleInfo>,
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            persistent: false,
            cards: BTreeMap::new(),
            bundles: vec![],
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// LOCALE QUERY
// =============================================================================

/// `?locale=` query parameter shared by the read endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

/// `?q=&locale=` query of the search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub locale: Option<String>,
}

// =============================================================================
// DECK RESPONSE
// =============================================================================

/// One bucket of a decoded deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketJson {
    pub category: String,
    pub title: String,
    pub entries: Vec<DeckEntry>,
}

/// Decoded deck response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckResponse {
    pub success: bool,
    pub code: String,
    pub locale: Option<Locale>,
    pub card_count: u64,
    #[serde(default)]
    pub buckets: Vec<BucketJson>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<DeckCodeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uncategorized: Vec<DeckEntry>,
    pub error: Option<String>,
}

impl DeckResponse {
    pub fn error(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.into(),
            locale: None,
            card_count: 0,
            buckets: vec![],
            unresolved: vec![],
            uncategorized: vec![],
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// CARD RESPONSE
// =============================================================================

/// Card details response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardResponse {
    pub success: bool,
    pub found: bool,
    #[serde(default)]
    pub cards: Vec<Card>,
    pub error: Option<String>,
}

impl CardResponse {
    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            success: true,
            found: !cards.is_empty(),
            cards,
            error: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            success: true,
            found: false,
            cards: vec![],
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            found: false,
            cards: vec![],
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// SEARCH RESPONSE
// =============================================================================

/// A name -> code suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub name: String,
    pub value: String,
}

impl From<&Card> for Choice {
    fn from(card: &Card) -> Self {
        Self {
            name: card.name.clone(),
            value: card.card_code.clone(),
        }
    }
}

/// Card name search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub choices: Vec<Choice>,
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn with_cards(cards: &[Card]) -> Self {
        Self {
            success: true,
            choices: cards.iter().map(Choice::from).collect(),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            choices: vec![],
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// GUILD SETTINGS
// =============================================================================

/// Partial update of a guild's settings. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsRequest {
    pub locale: Option<String>,
    pub viewer_template: Option<String>,
    pub viewer_label: Option<String>,
}

/// Effective settings of a guild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub success: bool,
    pub guild_id: String,
    pub locale: Locale,
    pub viewer_template: String,
    pub viewer_label: String,
    /// Viewer URL of a sample deck, to check the template.
    pub preview_url: String,
    pub error: Option<String>,
}

impl SettingsResponse {
    pub fn from_settings(guild_id: impl Into<String>, settings: &GuildSettings) -> Self {
        let viewer = settings.effective_viewer();
        Self {
            success: true,
            guild_id: guild_id.into(),
            locale: settings.effective_locale(),
            viewer_template: viewer.template().to_string(),
            viewer_label: viewer.label().to_string(),
            preview_url: viewer.preview_url(),
            error: None,
        }
    }

    pub fn error(guild_id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            error: Some(msg.into()),
            success: false,
            ..Self::from_settings(guild_id, &GuildSettings::default())
        }
    }
}

// =============================================================================
// INTERACTIONS
// =============================================================================

/// What the client wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    #[default]
    Command,
    Autocomplete,
}

/// A slash-command style invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRequest {
    #[serde(default, rename = "type")]
    pub kind: InteractionKind,
    pub command: String,
    pub guild_id: Option<String>,
    #[serde(default)]
    pub options: CommandOptions,
}

/// Reply to an interaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    #[serde(default)]
    pub buttons: Vec<LinkButton>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub ephemeral: bool,
    pub error: Option<String>,
}

impl InteractionResponse {
    pub fn embeds(embeds: Vec<Embed>) -> Self {
        Self {
            success: true,
            embeds,
            ..Self::default()
        }
    }

    pub fn choices(choices: Vec<Choice>) -> Self {
        Self {
            success: true,
            choices,
            ..Self::default()
        }
    }

    pub fn content(text: impl Into<String>) -> Self {
        Self {
            success: true,
            content: Some(text.into()),
            ephemeral: true,
            ..Self::default()
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            ephemeral: true,
            error: Some(msg.into()),
            ..Self::default()
        }
    }
}
