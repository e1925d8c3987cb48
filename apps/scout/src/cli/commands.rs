//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::{api, render};
use scout_core::{
    Card, CardCatalog, Catalog, CatalogStore, DeckCodeEntry, DeckViewer, GuildSettings, Locale,
    Localizer, ScoutError, SetBundle, card_details, classify, decode_deck, encode,
    parse_bundle_file_name,
};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a set bundle file (64 MB).
///
/// The largest published bundles are a few MB per locale.
const MAX_BUNDLE_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ScoutError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ScoutError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ScoutError::Parse(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve `..` and symlinks; the path must name an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, ScoutError> {
    let canonical = path.canonicalize().map_err(|e| {
        ScoutError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ScoutError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

fn open_catalog(db_path: &Path) -> Result<Catalog, ScoutError> {
    Ok(Catalog::with_redb(db_path)?)
}

fn to_json(value: &impl serde::Serialize) -> Result<String, ScoutError> {
    serde_json::to_string_pretty(value).map_err(|e| ScoutError::Parse(format!("JSON output: {e}")))
}

fn print_json(value: &impl serde::Serialize) -> Result<(), ScoutError> {
    println!("{}", to_json(value)?);
    Ok(())
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(db_path: &Path, host: &str, port: u16) -> Result<(), ScoutError> {
    let catalog = open_catalog(db_path)?;
    let localizer = Localizer::embedded()?;

    println!("Scout Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Database: {:?}", db_path);
    println!();
    println!("Endpoints:");
    println!("  GET  /deck/{{code}}          - Decode a deck code");
    println!("  GET  /cards/{{code}}         - Card details");
    println!("  GET  /search?q=            - Card name search");
    println!("  POST /interactions         - deck / info / search / config commands");
    println!("  GET  /guilds/{{id}}/settings - Guild settings (PUT to update)");
    println!("  GET  /status               - Catalog status");
    println!("  GET  /health               - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, catalog, localizer).await
}

// =============================================================================
// DECODE COMMAND
// =============================================================================

/// Decode a deck code and print it grouped by category.
pub fn cmd_decode(
    db_path: &Path,
    json_mode: bool,
    code: &str,
    locale: &str,
) -> Result<(), ScoutError> {
    let locale: Locale = locale.parse()?;
    let catalog = open_catalog(db_path)?;
    let localizer = Localizer::embedded()?;

    let deck = decode_deck(&catalog, locale, code)?;
    for entry in deck.unresolved() {
        tracing::warn!(card_code = %entry.card_code, count = entry.count, %locale, "Card not in catalog");
    }
    let categories = classify(&deck);
    for entry in categories.uncategorized() {
        tracing::warn!(card_code = %entry.card.card_code, "Card matches no category");
    }

    if json_mode {
        let output = serde_json::json!({
            "code": code.trim(),
            "locale": locale,
            "card_count": deck.card_count(),
            "categories": categories,
            "unresolved": deck.unresolved(),
        });
        print_json(&output)?;
        return Ok(());
    }

    println!("{}", code.trim());
    println!();
    for field in render::deck_fields(&categories, locale, &localizer) {
        if field.name != render::CONTINUATION_TITLE {
            println!("{}", field.name);
        }
        println!("{}", field.value);
    }
    println!();
    println!("Cards: {}", deck.card_count());
    if !deck.unresolved().is_empty() {
        println!("Unknown cards: {}", deck.unresolved().len());
    }

    Ok(())
}

// =============================================================================
// ENCODE COMMAND
// =============================================================================

/// Parse a `CODE:COUNT` pair.
fn parse_pair(pair: &str) -> Result<DeckCodeEntry, ScoutError> {
    let (code, count) = pair
        .rsplit_once(':')
        .ok_or_else(|| ScoutError::Parse(format!("expected CODE:COUNT, got '{}'", pair)))?;
    let count: u32 = count
        .trim()
        .parse()
        .map_err(|e| ScoutError::Parse(format!("invalid count in '{}': {}", pair, e)))?;
    Ok(DeckCodeEntry::new(code.trim(), count))
}

/// Encode `CODE:COUNT` pairs into a deck code.
pub fn cmd_encode(json_mode: bool, cards: &[String]) -> Result<(), ScoutError> {
    let entries = cards
        .iter()
        .map(|pair| parse_pair(pair))
        .collect::<Result<Vec<_>, _>>()?;
    let code = encode(&entries)?;

    if json_mode {
        print_json(&serde_json::json!({ "code": code, "entries": entries }))?;
    } else {
        println!("{}", code);
    }
    Ok(())
}

// =============================================================================
// INFO / SEARCH COMMANDS
// =============================================================================

fn print_card(card: &Card) {
    println!(
        "{} {}({}) {}",
        card.card_code,
        render::region_tags(card),
        card.cost,
        card.name
    );
    println!("  {} / {}", card.card_type, card.rarity);
    if card.type_ref == "Unit" || card.type_ref == "Equipment" {
        println!("  {}|{}", card.attack, card.health);
    }
    if !card.keywords.is_empty() {
        println!("  {}", card.keywords.join(", "));
    }
    if !card.description_raw.is_empty() {
        println!("  {}", card.description_raw);
    }
    if !card.levelup_description_raw.is_empty() {
        println!("  Level up: {}", card.levelup_description_raw);
    }
}

/// Show a card and, for champions, their other levels.
pub fn cmd_info(db_path: &Path, json_mode: bool, code: &str, locale: &str) -> Result<(), ScoutError> {
    let locale: Locale = locale.parse()?;
    let catalog = open_catalog(db_path)?;
    let details = card_details(&catalog, locale, code)?;

    if json_mode {
        print_json(&details)?;
        return Ok(());
    }

    for (i, card) in details.cards.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_card(card);
    }
    Ok(())
}

/// Search cards by name.
pub fn cmd_search(
    db_path: &Path,
    json_mode: bool,
    query: &str,
    locale: &str,
) -> Result<(), ScoutError> {
    let locale: Locale = locale.parse()?;
    let catalog = open_catalog(db_path)?;
    let cards = catalog.search_by_name(locale, query)?;

    if json_mode {
        let choices: Vec<api::Choice> = cards.iter().map(api::Choice::from).collect();
        print_json(&choices)?;
        return Ok(());
    }

    if cards.is_empty() {
        println!("No cards match '{}'", query);
    }
    for card in &cards {
        println!("{}  {}", card.card_code, card.name);
    }
    Ok(())
}

// =============================================================================
// IMPORT COMMAND
// =============================================================================

/// Modification time of `path` in seconds since the epoch.
fn file_mtime(path: &Path) -> Result<u64, ScoutError> {
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| ScoutError::Io(format!("Cannot read modification time: {}", e)))?;
    modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| ScoutError::Io(format!("Modification time before epoch: {}", e)))
}

/// Read one bundle file into a `SetBundle`.
fn load_bundle(
    path: &Path,
    bundle_version: &str,
    last_modified: Option<u64>,
) -> Result<SetBundle, ScoutError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_BUNDLE_FILE_SIZE)?;

    let file_name = validated
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ScoutError::Io(format!("Path '{}' has no file name", path.display())))?;
    let (set, locale) = parse_bundle_file_name(file_name)?;

    let last_modified = match last_modified {
        Some(ts) => ts,
        None => file_mtime(&validated)?,
    };
    let contents = std::fs::read(&validated)
        .map_err(|e| ScoutError::Io(format!("Read file: {}", e)))?;

    SetBundle::from_json(locale, set, bundle_version, last_modified, &contents)
}

/// Sort key placing `en_us` bundles first.
///
/// Other locales take their reference fields from the English copy, so it
/// must be present before they are written.
fn english_first(bundle: &SetBundle) -> (bool, Locale, String) {
    (bundle.locale != Locale::EnUs, bundle.locale, bundle.set.clone())
}

/// Import set bundle files into the catalog.
pub fn cmd_import(
    db_path: &Path,
    json_mode: bool,
    files: &[PathBuf],
    bundle_version: &str,
    last_modified: Option<u64>,
) -> Result<(), ScoutError> {
    let mut bundles = files
        .iter()
        .map(|f| load_bundle(f, bundle_version, last_modified))
        .collect::<Result<Vec<_>, _>>()?;
    bundles.sort_by_key(english_first);

    let mut catalog = open_catalog(db_path)?;
    let mut results = Vec::with_capacity(bundles.len());
    for bundle in bundles {
        let info = bundle.info();
        let applied = catalog.import_bundle(bundle)?;
        if applied {
            tracing::info!(set = %info.set, locale = %info.locale, cards = info.card_count, "Bundle imported");
        } else {
            tracing::info!(set = %info.set, locale = %info.locale, "Bundle not newer than stored copy; skipped");
        }
        results.push((info, applied));
    }
    catalog.compact()?;

    if json_mode {
        let output: Vec<_> = results
            .iter()
            .map(|(info, applied)| {
                serde_json::json!({
                    "set": info.set,
                    "locale": info.locale,
                    "cards": info.card_count,
                    "applied": applied,
                })
            })
            .collect();
        print_json(&output)?;
        return Ok(());
    }

    for (info, applied) in &results {
        let state = if *applied { "imported" } else { "up to date" };
        println!(
            "{:<8} {:<6} {:>5} cards  {}",
            info.set, info.locale, info.card_count, state
        );
    }
    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show catalog contents.
pub fn cmd_status(db_path: &Path, json_mode: bool) -> Result<(), ScoutError> {
    let catalog = open_catalog(db_path)?;
    let bundles = catalog.bundles()?;

    let mut counts = Vec::new();
    for locale in Locale::ALL {
        let count = catalog.card_count(locale)?;
        if count > 0 {
            counts.push((locale, count));
        }
    }

    if json_mode {
        let cards: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(locale, count)| (locale.to_string(), serde_json::json!(count)))
            .collect();
        print_json(&serde_json::json!({
            "database": db_path.to_string_lossy(),
            "cards": cards,
            "bundles": bundles,
        }))?;
        return Ok(());
    }

    println!("Scout Catalog Status");
    println!("====================");
    println!("Database: {:?}", db_path);
    println!();
    if counts.is_empty() {
        println!("No cards imported. Run `scout import <set>-<locale>.json`.");
    }
    for (locale, count) in &counts {
        println!("{:<6} {:>5} cards  ({})", locale, count, locale.name());
    }
    if !bundles.is_empty() {
        println!();
        println!("Bundles:");
        for b in &bundles {
            println!(
                "  {:<8} {:<6} v{} ({} cards, modified {})",
                b.set, b.locale, b.version, b.card_count, b.last_modified
            );
        }
    }
    Ok(())
}

// =============================================================================
// SETTINGS COMMAND
// =============================================================================

/// Show a guild's settings, updating them first when any option is given.
pub fn cmd_settings(
    db_path: &Path,
    json_mode: bool,
    guild: &str,
    locale: Option<String>,
    template: Option<String>,
    label: Option<String>,
) -> Result<(), ScoutError> {
    let mut catalog = open_catalog(db_path)?;
    let mut settings: GuildSettings = catalog.guild_settings(guild)?.unwrap_or_default();

    let changed = locale.is_some() || template.is_some() || label.is_some();
    if let Some(locale) = locale {
        settings.locale = Some(locale.parse()?);
    }
    if template.is_some() || label.is_some() {
        let current = settings.effective_viewer();
        let template = template.unwrap_or_else(|| current.template().to_string());
        let label = label.unwrap_or_else(|| current.label().to_string());
        settings.viewer = Some(DeckViewer::new(template, label)?);
    }
    if changed {
        catalog.save_guild_settings(guild, &settings)?;
        tracing::info!(guild_id = guild, "Guild settings updated");
    }

    let response = api::SettingsResponse::from_settings(guild, &settings);
    if json_mode {
        print_json(&response)?;
        return Ok(());
    }

    println!("Guild:    {}", response.guild_id);
    println!("Language: {} ({})", response.locale, response.locale.name());
    println!("Viewer:   {} <{}>", response.viewer_label, response.viewer_template);
    println!("Preview:  {}", response.preview_url);
    Ok(())
}
