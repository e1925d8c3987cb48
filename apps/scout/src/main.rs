//! # Scout - Deck Code Service
//!
//! The main binary for decoding and displaying Legends of Runeterra decks.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for catalog import and lookups
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │             apps/scout (THE BINARY)            │
//! │                                                │
//! │   ┌─────────────┐          ┌─────────────┐     │
//! │   │    CLI      │          │  HTTP API   │     │
//! │   │   (clap)    │          │   (axum)    │     │
//! │   └──────┬──────┘          └──────┬──────┘     │
//! │          └───────────┬────────────┘            │
//! │                      ▼                         │
//! │              ┌───────────────┐                 │
//! │              │  scout-core   │                 │
//! │              │  (THE LOGIC)  │                 │
//! │              └───────────────┘                 │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! scout import set1-en_us.json set1-pt_br.json
//! scout decode CEDACAIFAEAQMAJJAEEAABQCA4CQCAQDAEAQWKRUAMEACAICBQBQCAIFB4AQMBJAAEDQKCQBAEAQCFA -l pt_br
//! scout serve --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use scout::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // SCOUT_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SCOUT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "scout=debug,scout_core=debug,tower_http=debug"
    } else {
        "scout=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_banner() {
    println!(
        r#"
  ███████╗ ██████╗ ██████╗ ██╗   ██╗████████╗
  ██╔════╝██╔════╝██╔═══██╗██║   ██║╚══██╔══╝
  ███████╗██║     ██║   ██║██║   ██║   ██║
  ╚════██║██║     ██║   ██║██║   ██║   ██║
  ███████║╚██████╗╚██████╔╝╚██████╔╝   ██║
  ╚══════╝ ╚═════╝ ╚═════╝  ╚═════╝    ╚═╝

  Deck Code Service v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
