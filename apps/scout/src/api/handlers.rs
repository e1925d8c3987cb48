//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Decode and lookup failures reach the client as one generic, localized
//! "invalid code" message. The underlying cause is logged.

use super::{
    AppState,
    options::OptionError,
    types::{
        BucketJson, CardResponse, Choice, DeckResponse, HealthResponse, InteractionKind,
        InteractionRequest, InteractionResponse, LocaleQuery, SearchQuery, SearchResponse,
        SettingsRequest, SettingsResponse, StatusResponse,
    },
};
use crate::render;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use scout_core::{
    CardCatalog, Catalog, CatalogStore, Categories, Deck, DeckViewer, GuildSettings, Locale,
    ScoutError, card_details, classify, decode_deck,
};
use std::collections::BTreeMap;

/// Message key shown for any decode or lookup failure.
const INVALID_CODE: &str = "invalid code";

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Parse an optional locale parameter, defaulting to `fallback`.
fn parse_locale(raw: Option<&str>, fallback: Locale) -> Result<Locale, ScoutError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse(),
        None => Ok(fallback),
    }
}

/// Decode, resolve and classify, logging the diagnostics the core reports.
fn decode_and_classify(
    catalog: &Catalog,
    locale: Locale,
    code: &str,
) -> Result<(Deck, Categories), ScoutError> {
    let deck = decode_deck(catalog, locale, code)?;

    for entry in deck.unresolved() {
        tracing::warn!(
            event = "unresolved_card",
            card_code = %entry.card_code,
            count = entry.count,
            %locale,
            "Card not found in catalog; omitted from deck"
        );
    }

    let categories = classify(&deck);
    for entry in categories.uncategorized() {
        tracing::warn!(
            event = "uncategorized_card",
            card_code = %entry.card.card_code,
            type_ref = %entry.card.type_ref,
            rarity_ref = %entry.card.rarity_ref,
            "Card matches no category; not displayed"
        );
    }

    Ok((deck, categories))
}

fn log_pipeline_error(code: &str, error: &ScoutError) {
    match error {
        ScoutError::Catalog(_) => {
            tracing::error!(event = "catalog_failure", deck_code = %code, error = %error, "Catalog lookup failed");
        }
        _ => {
            tracing::info!(event = "invalid_deck_code", deck_code = %code, error = %error, "Deck code rejected");
        }
    }
}

/// Stored settings of a guild; storage failures degrade to defaults.
fn guild_settings_or_default(catalog: &Catalog, guild_id: Option<&str>) -> GuildSettings {
    let Some(guild_id) = guild_id else {
        return GuildSettings::default();
    };
    match catalog.guild_settings(guild_id) {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(guild_id, error = %e, "Failed to read guild settings; using defaults");
            GuildSettings::default()
        }
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Catalog contents per locale and imported bundles.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog.read().await;

    let mut cards = BTreeMap::new();
    for locale in Locale::ALL {
        match catalog.card_count(locale) {
            Ok(0) => {}
            Ok(count) => {
                cards.insert(locale, count);
            }
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(StatusResponse::error(format!("Status failed: {}", e))),
                );
            }
        }
    }

    match catalog.bundles() {
        Ok(bundles) => (
            StatusCode::OK,
            Json(StatusResponse {
                success: true,
                persistent: catalog.is_persistent(),
                cards,
                bundles,
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(StatusResponse::error(format!("Status failed: {}", e))),
        ),
    }
}

// =============================================================================
// DECK HANDLER
// =============================================================================

/// Decode a deck code into categorized entries.
pub async fn deck_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> impl IntoResponse {
    let locale = match parse_locale(query.locale.as_deref(), Locale::default()) {
        Ok(l) => l,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(DeckResponse::error(code, e.to_string()))),
    };

    let catalog = state.catalog.read().await;
    match decode_and_classify(&catalog, locale, &code) {
        Ok((deck, categories)) => {
            let buckets = categories
                .buckets()
                .map(|(category, entries)| BucketJson {
                    category: category.label().to_string(),
                    title: state.localizer.localize(locale, category.label()).to_string(),
                    entries: entries.to_vec(),
                })
                .collect();
            let response = DeckResponse {
                success: true,
                code,
                locale: Some(locale),
                card_count: deck.card_count(),
                buckets,
                unresolved: deck.unresolved().to_vec(),
                uncategorized: categories.uncategorized().to_vec(),
                error: None,
            };
            (StatusCode::OK, Json(response))
        }
        Err(e) => {
            log_pipeline_error(&code, &e);
            let status = match e {
                ScoutError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            };
            let message = state.localizer.localize(locale, INVALID_CODE).to_string();
            (status, Json(DeckResponse::error(code, message)))
        }
    }
}

// =============================================================================
// CARD HANDLER
// =============================================================================

/// Card details, with the other levels of a champion.
pub async fn card_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> impl IntoResponse {
    let locale = match parse_locale(query.locale.as_deref(), Locale::default()) {
        Ok(l) => l,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(CardResponse::error(e.to_string()))),
    };

    let catalog = state.catalog.read().await;
    match card_details(&*catalog, locale, &code) {
        Ok(details) => (StatusCode::OK, Json(CardResponse::with_cards(details.cards))),
        Err(ScoutError::CardNotFound(_)) => (StatusCode::NOT_FOUND, Json(CardResponse::not_found())),
        Err(e) => {
            tracing::error!(card_code = %code, error = %e, "Card lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CardResponse::error(format!("Lookup failed: {}", e))),
            )
        }
    }
}

// =============================================================================
// SEARCH HANDLER
// =============================================================================

/// Card name search.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let locale = match parse_locale(query.locale.as_deref(), Locale::default()) {
        Ok(l) => l,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(SearchResponse::error(e.to_string()))),
    };

    let catalog = state.catalog.read().await;
    match catalog.search_by_name(locale, &query.q) {
        Ok(cards) => (StatusCode::OK, Json(SearchResponse::with_cards(&cards))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SearchResponse::error(format!("Search failed: {}", e))),
        ),
    }
}

// =============================================================================
// GUILD SETTINGS HANDLERS
// =============================================================================

/// Effective settings of a guild.
pub async fn get_settings_handler(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
) -> impl IntoResponse {
    let catalog = state.catalog.read().await;
    match catalog.guild_settings(&guild_id) {
        Ok(settings) => {
            let settings = settings.unwrap_or_default();
            (
                StatusCode::OK,
                Json(SettingsResponse::from_settings(guild_id, &settings)),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SettingsResponse::error(guild_id, format!("Read failed: {}", e))),
        ),
    }
}

/// Apply `request` on top of `current`.
fn apply_settings(
    mut current: GuildSettings,
    request: &SettingsRequest,
) -> Result<GuildSettings, ScoutError> {
    if let Some(locale) = &request.locale {
        current.locale = Some(locale.parse()?);
    }
    match (&request.viewer_template, &request.viewer_label) {
        (Some(template), Some(label)) => {
            current.viewer = Some(DeckViewer::new(template.as_str(), label.as_str())?);
        }
        (Some(template), None) => {
            let label = current.effective_viewer().label().to_string();
            current.viewer = Some(DeckViewer::new(template.as_str(), label)?);
        }
        (None, Some(label)) => {
            let template = current.effective_viewer().template().to_string();
            current.viewer = Some(DeckViewer::new(template, label.as_str())?);
        }
        (None, None) => {}
    }
    Ok(current)
}

/// Update a guild's settings.
pub async fn put_settings_handler(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    Json(request): Json<SettingsRequest>,
) -> impl IntoResponse {
    let mut catalog = state.catalog.write().await;

    let current = match catalog.guild_settings(&guild_id) {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SettingsResponse::error(guild_id, format!("Read failed: {}", e))),
            );
        }
    };

    let updated = match apply_settings(current, &request) {
        Ok(s) => s,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(SettingsResponse::error(guild_id, e.to_string())),
            );
        }
    };

    match catalog.save_guild_settings(&guild_id, &updated) {
        Ok(()) => {
            tracing::info!(guild_id = %guild_id, locale = %updated.effective_locale(), "Guild settings updated");
            (
                StatusCode::OK,
                Json(SettingsResponse::from_settings(guild_id, &updated)),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SettingsResponse::error(guild_id, format!("Save failed: {}", e))),
        ),
    }
}

// =============================================================================
// INTERACTIONS HANDLER
// =============================================================================

/// Run a slash-command style interaction (`deck`, `info`, `search`, `config`).
pub async fn interactions_handler(
    State(state): State<AppState>,
    Json(request): Json<InteractionRequest>,
) -> impl IntoResponse {
    tracing::debug!(command = %request.command, kind = ?request.kind, "Interaction received");

    match (request.kind, request.command.as_str()) {
        (InteractionKind::Autocomplete, "info" | "search") | (InteractionKind::Command, "search") => {
            let catalog = state.catalog.read().await;
            autocomplete(&catalog, &request)
        }
        (InteractionKind::Command, "deck") => {
            let catalog = state.catalog.read().await;
            deck_command(&state, &catalog, &request)
        }
        (InteractionKind::Command, "info") => {
            let catalog = state.catalog.read().await;
            info_command(&state, &catalog, &request)
        }
        (InteractionKind::Command, "config") => {
            let mut catalog = state.catalog.write().await;
            config_command(&mut catalog, &request)
        }
        (_, other) => (
            StatusCode::BAD_REQUEST,
            Json(InteractionResponse::error(format!("unknown command: {}", other))),
        ),
    }
}

type Reply = (StatusCode, Json<InteractionResponse>);

fn bad_request(msg: impl Into<String>) -> Reply {
    (StatusCode::BAD_REQUEST, Json(InteractionResponse::error(msg)))
}

/// Locale of an interaction: the `language` option, else the guild default.
fn interaction_locale(catalog: &Catalog, request: &InteractionRequest) -> Result<Locale, String> {
    let guild_locale = || {
        guild_settings_or_default(catalog, request.guild_id.as_deref()).effective_locale()
    };
    match request.options.get::<String>("language") {
        Ok(language) => parse_locale(Some(&language), guild_locale()).map_err(|e| e.to_string()),
        Err(OptionError::Missing(_)) => Ok(guild_locale()),
        Err(e) => Err(e.to_string()),
    }
}

fn autocomplete(catalog: &Catalog, request: &InteractionRequest) -> Reply {
    let locale = match interaction_locale(catalog, request) {
        Ok(l) => l,
        Err(e) => return bad_request(e),
    };
    let name = request.options.get_or("name", String::new());

    match catalog.search_by_name(locale, &name) {
        Ok(cards) => (
            StatusCode::OK,
            Json(InteractionResponse::choices(
                cards.iter().map(Choice::from).collect(),
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Name search failed");
            (StatusCode::OK, Json(InteractionResponse::choices(vec![])))
        }
    }
}

fn deck_command(state: &AppState, catalog: &Catalog, request: &InteractionRequest) -> Reply {
    let code = match request.options.get::<String>("code") {
        Ok(c) => c,
        Err(e) => return bad_request(e.to_string()),
    };
    let locale = match interaction_locale(catalog, request) {
        Ok(l) => l,
        Err(e) => return bad_request(e),
    };

    match decode_and_classify(catalog, locale, &code) {
        Ok((_deck, categories)) => {
            let settings = guild_settings_or_default(catalog, request.guild_id.as_deref());
            let mut embed = render::deck_embed(code.trim(), &categories, locale, &state.localizer);
            embed.footer = request.options.get::<String>("user").ok();
            let mut response = InteractionResponse::embeds(vec![embed]);
            response.buttons = vec![render::viewer_button(
                &settings.effective_viewer(),
                code.trim(),
                locale,
                &state.localizer,
            )];
            (StatusCode::OK, Json(response))
        }
        Err(e) => {
            log_pipeline_error(&code, &e);
            (
                StatusCode::OK,
                Json(InteractionResponse::error(
                    state.localizer.localize(locale, INVALID_CODE),
                )),
            )
        }
    }
}

fn info_command(state: &AppState, catalog: &Catalog, request: &InteractionRequest) -> Reply {
    let name = match request.options.get::<String>("name") {
        Ok(n) => n,
        Err(e) => return bad_request(e.to_string()),
    };
    let locale = match interaction_locale(catalog, request) {
        Ok(l) => l,
        Err(e) => return bad_request(e),
    };

    match card_details(catalog, locale, &name) {
        Ok(details) => {
            let embeds = details
                .cards
                .iter()
                .map(|card| render::card_embed(card, locale, &state.localizer))
                .collect();
            (StatusCode::OK, Json(InteractionResponse::embeds(embeds)))
        }
        Err(e) => {
            tracing::info!(card = %name, error = %e, "Card info failed");
            let message = format!("{}: {}", state.localizer.localize(locale, INVALID_CODE), name);
            (StatusCode::OK, Json(InteractionResponse::error(message)))
        }
    }
}

fn config_command(catalog: &mut Catalog, request: &InteractionRequest) -> Reply {
    let Some(guild_id) = request.guild_id.as_deref() else {
        return bad_request("config requires a guild");
    };
    let subcommand = match request.options.get::<String>("subcommand") {
        Ok(s) => s,
        Err(e) => return bad_request(e.to_string()),
    };

    let update = match subcommand.as_str() {
        "language" => match request.options.get::<String>("value") {
            Ok(value) => SettingsRequest {
                locale: Some(value),
                ..SettingsRequest::default()
            },
            Err(e) => return bad_request(e.to_string()),
        },
        "website" => {
            let template = request.options.get::<String>("template");
            let label = request.options.get::<String>("name");
            match (template, label) {
                (Ok(template), Ok(label)) => SettingsRequest {
                    viewer_template: Some(template),
                    viewer_label: Some(label),
                    ..SettingsRequest::default()
                },
                (Err(e), _) | (_, Err(e)) => return bad_request(e.to_string()),
            }
        }
        other => return bad_request(format!("unknown subcommand: {}", other)),
    };

    let current = guild_settings_or_default(catalog, Some(guild_id));
    let updated = match apply_settings(current, &update) {
        Ok(s) => s,
        Err(e) => return bad_request(e.to_string()),
    };
    if let Err(e) = catalog.save_guild_settings(guild_id, &updated) {
        tracing::error!(guild_id, error = %e, "Failed to save guild settings");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(InteractionResponse::error("Failed to save settings")),
        );
    }

    tracing::info!(guild_id, subcommand = %subcommand, "Guild settings updated");
    let viewer = updated.effective_viewer();
    let mut response = InteractionResponse::content("Done!");
    if subcommand == "website" {
        response.buttons = vec![render::LinkButton {
            label: viewer.label().to_string(),
            url: viewer.preview_url(),
        }];
    }
    (StatusCode::OK, Json(response))
}
