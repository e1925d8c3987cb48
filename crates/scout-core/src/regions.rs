//! # Regions
//!
//! The region table shared by the deck code codec and by presentation.
//!
//! Each region has a numeric faction id (used on the wire), a two letter
//! short code (used in card codes such as `06NX012`), the reference name used
//! by Data Dragon (`regionRefs`), and the first deck code version that can
//! carry it.

use serde::{Deserialize, Serialize};

/// A card region (faction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Demacia,
    Freljord,
    Ionia,
    Noxus,
    PiltoverZaun,
    ShadowIsles,
    Bilgewater,
    Shurima,
    Targon,
    BandleCity,
    Runeterra,
}

impl Region {
    /// Every region, ordered by faction id.
    pub const ALL: [Region; 11] = [
        Region::Demacia,
        Region::Freljord,
        Region::Ionia,
        Region::Noxus,
        Region::PiltoverZaun,
        Region::ShadowIsles,
        Region::Bilgewater,
        Region::Shurima,
        Region::Targon,
        Region::BandleCity,
        Region::Runeterra,
    ];

    /// Faction id written in deck codes. Note that 8 and 11 are unassigned.
    #[must_use]
    pub const fn faction_id(self) -> u64 {
        match self {
            Region::Demacia => 0,
            Region::Freljord => 1,
            Region::Ionia => 2,
            Region::Noxus => 3,
            Region::PiltoverZaun => 4,
            Region::ShadowIsles => 5,
            Region::Bilgewater => 6,
            Region::Shurima => 7,
            Region::Targon => 9,
            Region::BandleCity => 10,
            Region::Runeterra => 12,
        }
    }

    /// Two letter code used inside card codes.
    #[must_use]
    pub const fn short(self) -> &'static str {
        match self {
            Region::Demacia => "DE",
            Region::Freljord => "FR",
            Region::Ionia => "IO",
            Region::Noxus => "NX",
            Region::PiltoverZaun => "PZ",
            Region::ShadowIsles => "SI",
            Region::Bilgewater => "BW",
            Region::Shurima => "SH",
            Region::Targon => "MT",
            Region::BandleCity => "BC",
            Region::Runeterra => "RU",
        }
    }

    /// Locale independent name, as found in `Card::region_refs`.
    #[must_use]
    pub const fn reference(self) -> &'static str {
        match self {
            Region::Demacia => "Demacia",
            Region::Freljord => "Freljord",
            Region::Ionia => "Ionia",
            Region::Noxus => "Noxus",
            Region::PiltoverZaun => "PiltoverZaun",
            Region::ShadowIsles => "ShadowIsles",
            Region::Bilgewater => "Bilgewater",
            Region::Shurima => "Shurima",
            Region::Targon => "Targon",
            Region::BandleCity => "BandleCity",
            Region::Runeterra => "Runeterra",
        }
    }

    /// First deck code version able to encode this region.
    #[must_use]
    pub const fn min_version(self) -> u8 {
        match self {
            Region::Demacia
            | Region::Freljord
            | Region::Ionia
            | Region::Noxus
            | Region::PiltoverZaun
            | Region::ShadowIsles => 1,
            Region::Bilgewater | Region::Targon => 2,
            Region::Shurima => 3,
            Region::BandleCity => 4,
            Region::Runeterra => 5,
        }
    }

    #[must_use]
    pub fn from_faction_id(id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.faction_id() == id)
    }

    #[must_use]
    pub fn from_short(short: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.short() == short)
    }

    #[must_use]
    pub fn from_reference(reference: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.reference() == reference)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reference())
    }
}

/// Short code for a region reference, `"XX"` when unknown.
#[must_use]
pub fn short_for_reference(reference: &str) -> &'static str {
    Region::from_reference(reference).map_or("XX", Region::short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_agree() {
        for region in Region::ALL {
            assert_eq!(Region::from_faction_id(region.faction_id()), Some(region));
            assert_eq!(Region::from_short(region.short()), Some(region));
            assert_eq!(Region::from_reference(region.reference()), Some(region));
        }
    }

    #[test]
    fn unassigned_faction_ids() {
        assert_eq!(Region::from_faction_id(8), None);
        assert_eq!(Region::from_faction_id(11), None);
    }

    #[test]
    fn unknown_reference_is_xx() {
        assert_eq!(short_for_reference("Noxus"), "NX");
        assert_eq!(short_for_reference("Ixtal"), "XX");
    }
}
