//! # Persistent Storage
//!
//! Disk-backed catalog built on the redb embedded database.

mod redb_catalog;

pub use redb_catalog::RedbCatalog;
