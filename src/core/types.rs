//! Strongly-typed wrappers for card pool concepts
//!
//! Card identifiers and set abbreviations are both plain strings in the
//! source tables. Wrapping them keeps a set code from being pushed into a
//! rarity bucket by accident.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Card identifier, unique within its pool
///
/// Advanced crypt cards carry a `(ADV)` suffix so they stay distinct from
/// the base vampire of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardName(String);

impl CardName {
    pub fn new(s: impl Into<String>) -> Self {
        CardName(s.into())
    }

    /// Identifier for the advanced version of a crypt card
    pub fn advanced(base: &str) -> Self {
        CardName(format!("{base}(ADV)"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for CardName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for CardName {
    fn from(s: String) -> Self {
        CardName(s)
    }
}

impl From<&str> for CardName {
    fn from(s: &str) -> Self {
        CardName(s.to_string())
    }
}

/// Set abbreviation as used in the `Set` column of card tables (e.g. "Jyhad", "BH")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetAbbrev(String);

impl SetAbbrev {
    pub fn new(s: impl Into<String>) -> Self {
        SetAbbrev(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw abbreviation from a set segment
    pub fn matches(&self, raw: &str) -> bool {
        self.0.eq_ignore_ascii_case(raw)
    }
}

impl fmt::Display for SetAbbrev {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for SetAbbrev {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SetAbbrev {
    fn from(s: &str) -> Self {
        SetAbbrev(s.to_string())
    }
}
