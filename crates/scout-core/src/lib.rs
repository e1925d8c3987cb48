//! # scout-core
//!
//! The deck pipeline for Scout - THE LOGIC.
//!
//! ```text
//! deck code -> codec -> (code, count) -> resolver (one catalog call)
//!           -> sorted Deck -> classifier -> category buckets
//! ```
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Deterministic: BTreeMap ordering everywhere, no randomness
//! - Reaches card data only through the `CardCatalog` trait
//! - Reports diagnostics as data; logging is the binary's job

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod classifier;
pub mod codec;
pub mod i18n;
pub mod info;
pub mod locale;
pub mod primitives;
pub mod regions;
pub mod resolver;
pub mod settings;
pub mod storage;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Card, CardAsset, CatalogError, Deck, DeckCodeEntry, DeckEntry, ScoutError, compare_entries,
};

// =============================================================================
// RE-EXPORTS: Pipeline
// =============================================================================

pub use catalog::{
    BundleInfo, CardCatalog, Catalog, CatalogStore, MemoryCatalog, SetBundle,
    parse_bundle_file_name,
};
pub use classifier::{Categories, Category, classify};
pub use codec::{CardCode, DecodeError, EncodeError, decode, encode};
pub use i18n::Localizer;
pub use info::{CardDetails, card_details};
pub use locale::Locale;
pub use regions::Region;
pub use resolver::{decode_deck, resolve};
pub use settings::{DeckViewer, GuildSettings};
pub use storage::RedbCatalog;
