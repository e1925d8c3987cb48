//! # Deck Code Codec
//!
//! Conversion between the compact textual deck code and `(card code, count)`
//! pairs. No catalog access happens here.
//!
//! ## Wire Format
//!
//! ```text
//! base32( [format << 4 | version]
//!         section(3) section(2) section(1)
//!         { count set faction number }* )
//!
//! section(n) = groups { cards set faction number{cards} }{groups}
//! ```
//!
//! Every field after the first byte is an unsigned varint. A section holds
//! every card present exactly `n` times, grouped by set and faction; cards held
//! in any other quantity follow one by one with an explicit count.
//!
//! The count grouping is a wire artifact only: decoded entries come out in
//! wire order, which carries no meaning. Callers sort after resolution.

mod card_code;
mod varint;

pub use card_code::CardCode;

use crate::DeckCodeEntry;
use crate::primitives::{DECK_CODE_FORMAT, GROUPED_COUNTS, MAX_DECK_CODE_LENGTH, MAX_KNOWN_VERSION};
use crate::regions::Region;
use std::collections::BTreeMap;
use thiserror::Error;
use varint::{ByteReader, write_varint};

const BASE32: base32::Alphabet = base32::Alphabet::Rfc4648 { padding: false };

// =============================================================================
// ERRORS
// =============================================================================

/// Why a deck code could not be decoded.
///
/// Every variant keeps its own cause so logs can tell a truncated code from an
/// unsupported one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The text is not valid base32.
    #[error("invalid base32 encoding")]
    InvalidEncoding,

    /// The text is longer than any real deck code.
    #[error("deck code too long: {0} characters")]
    TooLong(usize),

    /// The byte stream ended in the middle of a field.
    #[error("failed to read {context}: unexpected end of input")]
    UnexpectedEnd { context: &'static str },

    /// The format nibble is not one this codec knows.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(u8),

    /// The version nibble is newer than this codec.
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    /// A varint does not fit in 64 bits.
    #[error("failed to read {context}: varint overflows 64 bits")]
    VarintOverflow { context: &'static str },

    /// The faction id maps to no region.
    #[error("unknown faction id: {0}")]
    UnknownFaction(u64),

    /// An explicit count of zero.
    #[error("card {0} has a count of zero")]
    ZeroCount(String),

    /// A field decoded to a value that does not fit its type.
    #[error("{context} out of range: {value}")]
    ValueOutOfRange { context: &'static str, value: u64 },
}

/// Why a set of entries could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The card code is not `SSRRNNN` with a known region.
    #[error("invalid card code: {0}")]
    InvalidCardCode(String),

    /// Entries must hold at least one copy.
    #[error("card {0} has a count of zero")]
    ZeroCount(String),
}

// =============================================================================
// DECODE
// =============================================================================

/// Decode a deck code into `(card code, count)` pairs, in wire order.
///
/// Surrounding whitespace, trailing `=` padding and lowercase input are
/// tolerated.
pub fn decode(code: &str) -> Result<Vec<DeckCodeEntry>, DecodeError> {
    let normalized = code.trim().trim_end_matches('=').to_ascii_uppercase();
    if normalized.len() > MAX_DECK_CODE_LENGTH {
        return Err(DecodeError::TooLong(normalized.len()));
    }
    let bytes = if normalized.is_empty() {
        Vec::new()
    } else {
        base32::decode(BASE32, &normalized).ok_or(DecodeError::InvalidEncoding)?
    };

    decode_bytes(&bytes)
}

/// Decode the raw (already base32-decoded) byte form.
pub fn decode_bytes(bytes: &[u8]) -> Result<Vec<DeckCodeEntry>, DecodeError> {
    let mut reader = ByteReader::new(bytes);

    let header = reader.read_byte("format and version")?;
    let format = header >> 4;
    let version = header & 0x0F;
    if format != DECK_CODE_FORMAT {
        return Err(DecodeError::UnsupportedFormat(format));
    }
    if version > MAX_KNOWN_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let mut entries = Vec::new();

    for count in GROUPED_COUNTS {
        let groups = reader.read_varint("group count")?;
        for _ in 0..groups {
            let cards = reader.read_varint("card count")?;
            let set = reader.read_varint("set")?;
            let region = read_region(&mut reader)?;
            for _ in 0..cards {
                let number = reader.read_varint("card number")?;
                let code = CardCode::new(set, region, number);
                entries.push(DeckCodeEntry::new(code.to_string(), count));
            }
        }
    }

    while !reader.is_empty() {
        let raw_count = reader.read_varint("count")?;
        let set = reader.read_varint("set")?;
        let region = read_region(&mut reader)?;
        let number = reader.read_varint("card number")?;
        let code = CardCode::new(set, region, number).to_string();

        let count = u32::try_from(raw_count).map_err(|_| DecodeError::ValueOutOfRange {
            context: "count",
            value: raw_count,
        })?;
        if count == 0 {
            return Err(DecodeError::ZeroCount(code));
        }
        entries.push(DeckCodeEntry::new(code, count));
    }

    Ok(entries)
}

fn read_region(reader: &mut ByteReader<'_>) -> Result<Region, DecodeError> {
    let faction = reader.read_varint("faction")?;
    Region::from_faction_id(faction).ok_or(DecodeError::UnknownFaction(faction))
}

// =============================================================================
// ENCODE
// =============================================================================

/// Encode `(card code, count)` pairs into a deck code.
///
/// The written version is the lowest one that supports every region present.
/// Input order does not matter: the same multiset always yields the same code.
pub fn encode(entries: &[DeckCodeEntry]) -> Result<String, EncodeError> {
    Ok(base32::encode(BASE32, &encode_bytes(entries)?))
}

/// Encode into the raw byte form (before base32).
pub fn encode_bytes(entries: &[DeckCodeEntry]) -> Result<Vec<u8>, EncodeError> {
    let mut parsed = Vec::with_capacity(entries.len());
    for entry in entries {
        let code: CardCode = entry.card_code.parse()?;
        if entry.count == 0 {
            return Err(EncodeError::ZeroCount(entry.card_code.clone()));
        }
        parsed.push((code, entry.count));
    }

    let version = parsed
        .iter()
        .map(|(code, _)| code.region.min_version())
        .max()
        .unwrap_or(1);

    let mut out = vec![(DECK_CODE_FORMAT << 4) | version];

    for count in GROUPED_COUNTS {
        let codes: Vec<CardCode> = parsed
            .iter()
            .filter(|(_, c)| *c == count)
            .map(|(code, _)| *code)
            .collect();
        let groups = group_by_set_and_region(codes);

        write_varint(&mut out, groups.len() as u64);
        for group in groups {
            let Some(first) = group.first() else {
                continue;
            };
            write_varint(&mut out, group.len() as u64);
            write_varint(&mut out, first.set);
            write_varint(&mut out, first.region.faction_id());
            for code in &group {
                write_varint(&mut out, code.number);
            }
        }
    }

    let mut rest: Vec<(CardCode, u32)> = parsed
        .into_iter()
        .filter(|(_, c)| !GROUPED_COUNTS.contains(c))
        .collect();
    rest.sort_by_cached_key(|(code, _)| code.to_string());
    for (code, count) in rest {
        write_varint(&mut out, u64::from(count));
        write_varint(&mut out, code.set);
        write_varint(&mut out, code.region.faction_id());
        write_varint(&mut out, code.number);
    }

    Ok(out)
}

/// Group codes sharing set and region.
///
/// Cards inside a group are sorted by code text; groups are ordered by size,
/// then by their first code.
fn group_by_set_and_region(codes: Vec<CardCode>) -> Vec<Vec<CardCode>> {
    let mut by_key: BTreeMap<(u64, Region), Vec<CardCode>> = BTreeMap::new();
    for code in codes {
        by_key.entry((code.set, code.region)).or_default().push(code);
    }

    let mut groups: Vec<Vec<CardCode>> = by_key
        .into_values()
        .map(|mut group| {
            group.sort_by_cached_key(ToString::to_string);
            group
        })
        .collect();
    groups.sort_by_cached_key(|g| (g.len(), g.first().map(ToString::to_string)));
    groups
}

// =============================================================================
// TESTS
// =============================================================================
