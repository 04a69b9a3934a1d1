//! Per-card draw counts across all boosters of a run

use crate::core::CardName;
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

/// Running count of how often each card was drawn
///
/// Iteration follows first-draw order, so the listing is deterministic for
/// a given sequence of draws.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawTally {
    index: FxHashMap<CardName, usize>,
    entries: Vec<(CardName, usize)>,
}

impl DrawTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every drawn card once, inserting unseen cards at zero first
    pub fn accumulate(&mut self, drawn: &[CardName]) {
        for card in drawn {
            let slot = match self.index.get(card) {
                Some(&slot) => slot,
                None => {
                    let slot = self.entries.len();
                    self.index.insert(card.clone(), slot);
                    self.entries.push((card.clone(), 0));
                    slot
                }
            };
            self.entries[slot].1 += 1;
        }
    }

    pub fn count(&self, name: &str) -> usize {
        self.index.get(name).map_or(0, |&slot| self.entries[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CardName, usize)> {
        self.entries.iter().map(|(name, count)| (name, *count))
    }

    /// Distinct cards drawn
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Listing lines in `<count>x <card>` form
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(name, count)| format!("{count}x {name}"))
    }
}

impl Serialize for DrawTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
