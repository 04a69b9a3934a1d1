//! Card set reference data

use crate::core::SetAbbrev;
use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A card set (expansion) as listed in the sets table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetInfo {
    pub abbrev: SetAbbrev,
    pub full_name: String,
}

impl SetInfo {
    pub fn new(abbrev: impl Into<SetAbbrev>, full_name: impl Into<String>) -> Self {
        SetInfo {
            abbrev: abbrev.into(),
            full_name: full_name.into(),
        }
    }

    /// Does the user's input name this set by its full name?
    ///
    /// Accents and case are ignored ("Heirs to the Blood" == "heirs to the blood").
    pub fn full_name_matches(&self, input: &str) -> bool {
        normalize(&self.full_name) == normalize(input)
    }
}

impl fmt::Display for SetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.abbrev, self.full_name)
    }
}

/// ASCII-folded, lowercased, trimmed form used for name comparisons
pub fn normalize(s: &str) -> String {
    deunicode(s.trim()).to_lowercase()
}
