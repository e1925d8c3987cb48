//! # Scout
//!
//! HTTP API and CLI over the `scout-core` deck pipeline.
//!
//! - `api`: axum server (decks, cards, search, guild settings, interactions)
//! - `cli`: clap commands
//! - `render`: embed-shaped presentation of decks and cards

pub mod api;
pub mod cli;
pub mod render;
