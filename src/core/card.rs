//! Card records and the set/rarity encoding they carry

use crate::core::CardName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between `Set:Rarity` segments in the `Set` column
pub const SEGMENT_SEPARATOR: &str = ", ";

/// Which population a card belongs to
///
/// Crypt cards are limited (one copy per deck), library cards are
/// unlimited (playsets). Fixed at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardPool {
    Limited,
    Unlimited,
}

impl CardPool {
    /// Table label used in console output
    pub fn label(&self) -> &'static str {
        match self {
            CardPool::Limited => "Crypt",
            CardPool::Unlimited => "Library",
        }
    }
}

impl fmt::Display for CardPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A card as loaded from the crypt or library table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Identifier, unique within the pool
    pub name: CardName,

    /// Raw `Set` column, e.g. `"Jyhad:U2, VTES:U, KoT:P"`
    pub sets: String,

    pub pool: CardPool,
}

impl CardRecord {
    pub fn new(name: impl Into<CardName>, sets: impl Into<String>, pool: CardPool) -> Self {
        CardRecord {
            name: name.into(),
            sets: sets.into(),
            pool,
        }
    }

    /// Set segments in the order they appear in the record
    pub fn segments(&self) -> impl Iterator<Item = SetSegment<'_>> {
        self.sets
            .split(SEGMENT_SEPARATOR)
            .filter(|raw| !raw.is_empty())
            .map(SetSegment::parse)
    }
}

/// One `SetCode:RarityEncoding` segment of a card's set field
///
/// Only the first two colon-separated parts carry meaning. Anything after
/// the second colon (`"POD:DTC"` print-on-demand restrictions) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetSegment<'a> {
    pub abbrev: &'a str,
    pub rarities: Option<&'a str>,
    pub raw: &'a str,
}

impl<'a> SetSegment<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let mut parts = raw.split(':');
        let abbrev = parts.next().unwrap_or("");
        let rarities = parts.next();
        SetSegment {
            abbrev,
            rarities,
            raw,
        }
    }

    /// Rarity tokens in encoding order
    ///
    /// A segment without a rarity part yields a single empty token so that
    /// it still reaches the fallback classification.
    pub fn tokens(&self) -> impl Iterator<Item = &'a str> {
        self.rarities.unwrap_or("").split('/')
    }
}
