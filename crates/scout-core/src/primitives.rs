//! # Primitives
//!
//! Fixed constants of the deck code wire format and of the catalog contract.
//!
//! These values are compiled into the binary and are immutable at runtime.

/// Deck code format nibble. Only format 1 has ever been published.
pub const DECK_CODE_FORMAT: u8 = 1;

/// Highest deck code version this codec understands.
///
/// Each version added factions; see `Region::min_version`.
pub const MAX_KNOWN_VERSION: u8 = 5;

/// Deck code sections with an implicit count, in wire order.
///
/// Cards held in any other quantity are written one by one with an explicit
/// count after these sections.
pub const GROUPED_COUNTS: [u32; 3] = [3, 2, 1];

/// Maximum number of bytes in a single varint (ceil(64 / 7)).
pub const MAX_VARINT_BYTES: usize = 10;

/// Maximum length accepted for a textual deck code.
///
/// A full 40 card deck with every card from a distinct group stays well below
/// this; anything longer is rejected before base32 decoding.
pub const MAX_DECK_CODE_LENGTH: usize = 1024;

/// Maximum number of cards returned by a name search.
pub const MAX_SEARCH_RESULTS: usize = 25;

/// Rarity / supertype reference marking a champion.
pub const CHAMPION: &str = "Champion";
