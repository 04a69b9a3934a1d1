//! Rarity classification of one pool for one target set
//!
//! Segments and tokens are scanned in encoding order: the first segment
//! naming the target set decides, and within it the first recognized
//! rarity token wins.

use crate::core::{CardName, CardPool, CardRecord, Classification, SetAbbrev, SetSegment};
use crate::loader::CardTable;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Cards of one pool sorted into rarity buckets for one set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RarityBuckets {
    pub common: Vec<CardName>,
    pub vampire: Vec<CardName>,
    pub uncommon: Vec<CardName>,
    pub rare: Vec<CardName>,
    pub preconstructed: Vec<CardName>,
    /// Cards that carry the target set at all, classified or not
    pub in_set: usize,
}

impl RarityBuckets {
    pub fn bucket(&self, classification: Classification) -> &[CardName] {
        match classification {
            Classification::Common => &self.common,
            Classification::Vampire => &self.vampire,
            Classification::Uncommon => &self.uncommon,
            Classification::Rare => &self.rare,
            Classification::PreconstructedOnly => &self.preconstructed,
        }
    }

    fn bucket_mut(&mut self, classification: Classification) -> &mut Vec<CardName> {
        match classification {
            Classification::Common => &mut self.common,
            Classification::Vampire => &mut self.vampire,
            Classification::Uncommon => &mut self.uncommon,
            Classification::Rare => &mut self.rare,
            Classification::PreconstructedOnly => &mut self.preconstructed,
        }
    }

    /// Bucket holding a card, if any
    pub fn classification_of(&self, name: &str) -> Option<Classification> {
        Classification::ALL
            .into_iter()
            .find(|&c| self.bucket(c).iter().any(|n| n.as_str() == name))
    }

    /// Cards across all buckets
    pub fn total(&self) -> usize {
        Classification::ALL
            .into_iter()
            .map(|c| self.bucket(c).len())
            .sum()
    }
}

/// An unrecognized rarity token met during classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub pool: CardPool,
    pub card: CardName,
    pub token: String,
    pub segment: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} card {} was {:?} ({})",
            self.pool, self.card, self.token, self.segment
        )
    }
}

/// Buckets plus the diagnostics raised while filling them
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub buckets: RarityBuckets,
    pub diagnostics: Vec<Diagnostic>,
}

/// Classify every card of a pool for the target set
pub fn classify(cards: &CardTable, set: &SetAbbrev) -> Classified {
    let pool = cards.pool();
    let mut classifier = Classifier::new(pool);

    for card in cards.iter() {
        classifier.classify_card(card, set);
    }

    classifier.finish()
}

/// Classification state for one pool and one run
///
/// Card identifiers are unique within a `CardTable`, so each card is seen
/// once and lands in at most one bucket.
struct Classifier {
    pool: CardPool,
    out: Classified,
}

impl Classifier {
    fn new(pool: CardPool) -> Self {
        Classifier {
            pool,
            out: Classified::default(),
        }
    }

    fn classify_card(&mut self, card: &CardRecord, set: &SetAbbrev) {
        let Some(segment) = card.segments().find(|s| set.matches(s.abbrev)) else {
            return;
        };
        self.out.buckets.in_set += 1;

        if let Some(classification) = self.classify_segment(&card.name, segment) {
            self.out.buckets.bucket_mut(classification).push(card.name.clone());
        }
    }

    fn classify_segment(&mut self, name: &CardName, segment: SetSegment<'_>) -> Option<Classification> {
        let tokens: SmallVec<[&str; 4]> = segment.tokens().collect();
        let mut needs_fallback = false;

        for token in tokens {
            if let Some(classification) = Classification::from_token(token) {
                return Some(classification);
            }

            self.out.diagnostics.push(Diagnostic {
                pool: self.pool,
                card: name.clone(),
                token: token.to_string(),
                segment: segment.raw.to_string(),
            });

            match self.pool {
                CardPool::Unlimited => return Some(Classification::from_numeric_suffix(token)),
                // A later recognized token still wins over the fallback
                CardPool::Limited => needs_fallback = true,
            }
        }

        needs_fallback.then_some(Classification::PreconstructedOnly)
    }

    fn finish(self) -> Classified {
        self.out
    }
}
