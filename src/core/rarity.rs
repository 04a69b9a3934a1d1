//! Rarity classes and the per-set booster distribution

use crate::core::SetAbbrev;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rarity class a booster draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Vampire,
    Uncommon,
    Rare,
}

impl Rarity {
    /// Order in which a booster's classes are drawn and tallied
    pub const DRAW_ORDER: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Vampire,
        Rarity::Uncommon,
        Rarity::Rare,
    ];

    /// Order in which a booster's classes are printed
    pub const DISPLAY_ORDER: [Rarity; 4] = [
        Rarity::Vampire,
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
    ];

    /// Column name in the boosters table
    pub fn column(&self) -> &'static str {
        match self {
            Rarity::Common => "C",
            Rarity::Vampire => "V",
            Rarity::Uncommon => "U",
            Rarity::Rare => "R",
        }
    }

    /// Plural label used in console output
    pub fn plural(&self) -> &'static str {
        match self {
            Rarity::Common => "Commons",
            Rarity::Vampire => "Vampires",
            Rarity::Uncommon => "Uncommons",
            Rarity::Rare => "Rares",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Common => "Common",
            Rarity::Vampire => "Vampire",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
        };
        f.write_str(name)
    }
}

/// Bucket a card is classified into for one pool and one set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Common,
    Vampire,
    Uncommon,
    Rare,
    /// Only available in preconstructed decks of the set
    PreconstructedOnly,
}

impl Classification {
    pub const ALL: [Classification; 5] = [
        Classification::Vampire,
        Classification::Common,
        Classification::Uncommon,
        Classification::Rare,
        Classification::PreconstructedOnly,
    ];

    /// Map a rarity token by its leading character
    ///
    /// Returns None for characters outside the fixed table; the caller
    /// decides the fallback since it differs per pool.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.chars().next()? {
            'C' => Some(Classification::Common),
            'V' => Some(Classification::Vampire),
            'U' => Some(Classification::Uncommon),
            'R' => Some(Classification::Rare),
            // Legacy vampire alias
            'X' => Some(Classification::Vampire),
            'P' => Some(Classification::PreconstructedOnly),
            _ => None,
        }
    }

    /// Legacy numeric encoding used by the first library printings
    ///
    /// Leading non-digits are stripped (always keeping one character), then
    /// `1` is rare, `2` uncommon and anything else common.
    pub fn from_numeric_suffix(token: &str) -> Self {
        let mut rest = token;
        while rest.chars().count() > 1 && !rest.starts_with(|c: char| c.is_numeric()) {
            let mut chars = rest.chars();
            chars.next();
            rest = chars.as_str();
        }
        match rest {
            "1" => Classification::Rare,
            "2" => Classification::Uncommon,
            _ => Classification::Common,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Common => "commons",
            Classification::Vampire => "vampires",
            Classification::Uncommon => "uncommons",
            Classification::Rare => "rares",
            Classification::PreconstructedOnly => "preconstructed only",
        };
        f.write_str(name)
    }
}

/// Number of cards of each rarity class in one booster of a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RarityCounts {
    pub common: usize,
    pub vampire: usize,
    pub uncommon: usize,
    pub rare: usize,
}

impl RarityCounts {
    pub fn new(common: usize, vampire: usize, uncommon: usize, rare: usize) -> Self {
        RarityCounts {
            common,
            vampire,
            uncommon,
            rare,
        }
    }

    pub fn get(&self, rarity: Rarity) -> usize {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Vampire => self.vampire,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
        }
    }

    /// Cards in one booster
    pub fn total(&self) -> usize {
        self.common + self.vampire + self.uncommon + self.rare
    }
}

impl fmt::Display for RarityCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C: {}, V: {}, U: {}, R: {}",
            self.common, self.vampire, self.uncommon, self.rare
        )
    }
}

/// Booster distribution of one set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoosterDistribution {
    pub set: SetAbbrev,
    pub counts: RarityCounts,
}

impl BoosterDistribution {
    pub fn new(set: impl Into<SetAbbrev>, counts: RarityCounts) -> Self {
        BoosterDistribution {
            set: set.into(),
            counts,
        }
    }

    /// Sets without a vampire slot take their preconstructed crypt cards as uncommons
    pub fn has_vampire_slot(&self) -> bool {
        self.counts.vampire > 0
    }
}
