//! # Scout CLI Module
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `decode` - Decode a deck code into categorized cards
//! - `encode` - Build a deck code from `CODE:COUNT` pairs
//! - `info` - Show card details
//! - `search` - Search cards by name
//! - `import` - Import Data Dragon set bundles
//! - `status` - Show catalog contents
//! - `settings` - Show or update a guild's settings

mod commands;

use clap::{Parser, Subcommand};
use scout_core::ScoutError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Scout - Legends of Runeterra deck and card lookup
///
/// Decodes deck codes, resolves them against an imported card catalog and
/// groups the cards for display.
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the catalog database
    #[arg(short = 'D', long, global = true, default_value = "scout.db")]
    pub database: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Decode a deck code
    Decode {
        /// The deck code
        code: String,

        /// Card language (e.g. en_us, pt_br)
        #[arg(short, long, default_value = "en_us")]
        locale: String,
    },

    /// Encode a deck from CODE:COUNT pairs (e.g. 01DE001:3)
    Encode {
        /// Card code and count pairs
        #[arg(required = true)]
        cards: Vec<String>,
    },

    /// Show card details
    Info {
        /// Card code (e.g. 06NX012)
        code: String,

        /// Card language
        #[arg(short, long, default_value = "en_us")]
        locale: String,
    },

    /// Search cards by name
    Search {
        /// Part of the card name
        query: String,

        /// Card language
        #[arg(short, long, default_value = "en_us")]
        locale: String,
    },

    /// Import Data Dragon set bundles (`<set>-<locale>.json`)
    Import {
        /// Bundle files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Bundle version label
        #[arg(long, default_value = "local")]
        bundle_version: String,

        /// Last-modified timestamp (seconds); defaults to the file's mtime
        #[arg(long)]
        last_modified: Option<u64>,
    },

    /// Show catalog contents
    Status,

    /// Show or update a guild's settings
    Settings {
        /// Guild identifier
        guild: String,

        /// Default language
        #[arg(short, long)]
        locale: Option<String>,

        /// Deck viewer URL template containing {{code}}
        #[arg(short, long)]
        template: Option<String>,

        /// Deck viewer display name
        #[arg(long)]
        label: Option<String>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ScoutError> {
    let json_mode = cli.json_mode;
    let db = cli.database.as_path();

    match cli.command {
        Some(Commands::Serve { host, port }) => cmd_serve(db, &host, port).await,
        Some(Commands::Decode { code, locale }) => cmd_decode(db, json_mode, &code, &locale),
        Some(Commands::Encode { cards }) => cmd_encode(json_mode, &cards),
        Some(Commands::Info { code, locale }) => cmd_info(db, json_mode, &code, &locale),
        Some(Commands::Search { query, locale }) => cmd_search(db, json_mode, &query, &locale),
        Some(Commands::Import {
            files,
            bundle_version,
            last_modified,
        }) => cmd_import(db, json_mode, &files, &bundle_version, last_modified),
        Some(Commands::Settings {
            guild,
            locale,
            template,
            label,
        }) => cmd_settings(db, json_mode, &guild, locale, template, label),
        Some(Commands::Status) | None => cmd_status(db, json_mode),
    }
}
