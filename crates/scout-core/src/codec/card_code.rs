//! Structured card codes: `SSRRNNN` (set, region, number).

use super::EncodeError;
use crate::regions::Region;
use std::fmt;
use std::str::FromStr;

/// A parsed card code such as `06NX012`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardCode {
    pub set: u64,
    pub region: Region,
    pub number: u64,
}

impl CardCode {
    #[must_use]
    pub const fn new(set: u64, region: Region, number: u64) -> Self {
        Self {
            set,
            region,
            number,
        }
    }
}

impl fmt::Display for CardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{}{:03}", self.set, self.region.short(), self.number)
    }
}

impl FromStr for CardCode {
    type Err = EncodeError;

    /// Accepts exactly two set digits, a known region short code and three
    /// number digits. Token codes (`01DE012T1`) are not deck cards and fail.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EncodeError::InvalidCardCode(s.to_string());
        if s.len() != 7 || !s.is_ascii() {
            return Err(invalid());
        }
        let (set, rest) = s.split_at(2);
        let (short, number) = rest.split_at(2);
        if !set.bytes().all(|b| b.is_ascii_digit()) || !number.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        Ok(Self {
            set: set.parse().map_err(|_| invalid())?,
            region: Region::from_short(short).ok_or_else(invalid)?,
            number: number.parse().map_err(|_| invalid())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let code: CardCode = "06NX012".parse().expect("parse");
        assert_eq!(code, CardCode::new(6, Region::Noxus, 12));
        assert_eq!(code.to_string(), "06NX012");
    }

    #[test]
    fn rejects_malformed_codes() {
        for bad in ["", "06NX12", "06XX012", "6NX0123", "01DE012T1", "0ÅNX012", "AANX012"] {
            assert!(bad.parse::<CardCode>().is_err(), "{bad} should fail");
        }
    }
}
