//! Booster run driver
//!
//! Classifies both pools for the chosen set, reconciles them into booster
//! pools, draws the requested number of boosters and tallies the result.
//! Nothing is written here; the caller persists the tally once the whole
//! run has succeeded.

use crate::booster::classify::{classify, Classified, RarityBuckets};
use crate::booster::pools::{reconcile, BoosterPools};
use crate::booster::sampler::{BoosterSampler, InsufficientPool};
use crate::booster::tally::DrawTally;
use crate::core::{BoosterDistribution, CardName, CardPool, Classification, Rarity, SetInfo};
use crate::loader::RecordStore;
use crate::logger::{category, RunLogger};
use crate::{BoosterError, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Default output listing, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "import.txt";

/// Everything a run needs besides the record store
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Set abbreviation or full name as typed by the user
    pub set: String,
    pub num_boosters: usize,
    /// Fixed RNG seed; None seeds from system entropy
    pub seed: Option<u64>,
    pub output: PathBuf,
    /// Abort the run on the first booster that cannot be filled
    pub strict: bool,
}

impl GeneratorConfig {
    pub fn new(set: impl Into<String>, num_boosters: usize) -> Self {
        GeneratorConfig {
            set: set.into(),
            num_boosters,
            seed: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            strict: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Cards drawn for one rarity slot of a booster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotDraw {
    pub rarity: Rarity,
    pub cards: Vec<CardName>,
}

/// One generated booster
///
/// A booster is incomplete when one of its slots could not be filled.
/// Drawing stops at that slot and none of its cards are tallied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booster {
    pub number: usize,
    pub slots: Vec<SlotDraw>,
    pub failure: Option<InsufficientPool>,
}

impl Booster {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    pub fn slot(&self, rarity: Rarity) -> Option<&[CardName]> {
        self.slots
            .iter()
            .find(|s| s.rarity == rarity)
            .map(|s| s.cards.as_slice())
    }

    /// Cards in draw order
    pub fn cards(&self) -> impl Iterator<Item = &CardName> {
        self.slots.iter().flat_map(|s| s.cards.iter())
    }

    fn describe(&self) -> String {
        let mut block = match &self.failure {
            None => format!("Booster #{}:", self.number),
            Some(failure) => format!("Booster #{} (incomplete: {failure}):", self.number),
        };
        for rarity in Rarity::DISPLAY_ORDER {
            let label = format!("{}:", rarity.plural());
            let cards = match self.slot(rarity) {
                Some(cards) => format!(
                    "[{}]",
                    cards.iter().map(CardName::as_str).collect::<Vec<_>>().join(", ")
                ),
                None => "-".to_string(),
            };
            block.push_str(&format!("\n{label:<11}{cards}"));
        }
        block
    }
}

/// Outcome of a run, serializable for `--report`
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub set: SetInfo,
    pub distribution: BoosterDistribution,
    pub seed: u64,
    pub crypt: RarityBuckets,
    pub library: RarityBuckets,
    pub pools: BoosterPools,
    pub boosters: Vec<Booster>,
    pub tally: DrawTally,
}

impl RunReport {
    pub fn incomplete_boosters(&self) -> usize {
        self.boosters.iter().filter(|b| !b.is_complete()).count()
    }

    /// Total cards drawn into complete boosters
    pub fn total_draws(&self) -> usize {
        self.tally.total()
    }

    /// Bucket of a card in this run's classification, if any
    pub fn classification_of(&self, pool: CardPool, name: &str) -> Option<Classification> {
        match pool {
            CardPool::Limited => self.crypt.classification_of(name),
            CardPool::Unlimited => self.library.classification_of(name),
        }
    }
}

/// Generate all boosters of a run
pub fn generate(store: &RecordStore, config: &GeneratorConfig, logger: &RunLogger) -> Result<RunReport> {
    let set = store
        .resolve_set(&config.set)
        .ok_or_else(|| BoosterError::UnknownSet(config.set.clone()))?
        .clone();

    if config.num_boosters == 0 {
        return Err(BoosterError::InvalidBoosterCount(config.num_boosters.to_string()));
    }

    let crypt = classify(store.crypt(), &set.abbrev);
    let library = classify(store.library(), &set.abbrev);

    log_classified(logger, CardPool::Limited, &set, &crypt);
    log_classified(logger, CardPool::Unlimited, &set, &library);

    let distribution = store
        .distribution(&set.abbrev)
        .ok_or_else(|| BoosterError::MissingDistribution(set.abbrev.to_string()))?
        .clone();
    logger.minimal(category::SUMMARY, "");
    logger.minimal(category::SUMMARY, &format!("Boosters are: {}", distribution.counts));

    let pools = reconcile(&crypt.buckets, &library.buckets, &distribution);
    logger.minimal(
        category::SUMMARY,
        &format!(
            "Booster pools: {} vampires, {} commons, {} uncommons, {} rares",
            pools.vampire.len(),
            pools.common.len(),
            pools.uncommon.len(),
            pools.rare.len()
        ),
    );

    let mut sampler = match config.seed {
        Some(seed) => BoosterSampler::with_seed(seed),
        None => BoosterSampler::new(),
    };
    logger.minimal(category::SUMMARY, &format!("Using random seed: {}", sampler.seed()));

    let mut boosters = Vec::with_capacity(config.num_boosters);
    let mut tally = DrawTally::new();

    for number in 1..=config.num_boosters {
        let booster = draw_booster(&mut sampler, &pools, &distribution, number);

        logger.normal(category::SUMMARY, "");
        logger.normal(category::BOOSTER, &booster.describe());

        match booster.failure {
            None => {
                for slot in &booster.slots {
                    tally.accumulate(&slot.cards);
                }
            }
            Some(failure) => {
                logger.normal(
                    category::DIAGNOSTIC,
                    &format!("Booster #{number} left out of the tally: {failure}"),
                );
                if config.strict {
                    return Err(failure.into());
                }
            }
        }
        boosters.push(booster);
    }

    let report = RunReport {
        set,
        distribution,
        seed: sampler.seed(),
        crypt: crypt.buckets,
        library: library.buckets,
        pools,
        boosters,
        tally,
    };

    let incomplete = report.incomplete_boosters();
    if incomplete > 0 {
        logger.minimal(
            category::SUMMARY,
            &format!("{incomplete} of {} boosters incomplete", report.boosters.len()),
        );
    }

    Ok(report)
}

/// Draw one booster, slot by slot in draw order
pub fn draw_booster(
    sampler: &mut BoosterSampler,
    pools: &BoosterPools,
    distribution: &BoosterDistribution,
    number: usize,
) -> Booster {
    let mut slots = Vec::with_capacity(Rarity::DRAW_ORDER.len());

    for rarity in Rarity::DRAW_ORDER {
        let count = distribution.counts.get(rarity);
        match sampler.draw(pools.pool(rarity), rarity, count) {
            Ok(cards) => slots.push(SlotDraw { rarity, cards }),
            Err(failure) => {
                return Booster {
                    number,
                    slots,
                    failure: Some(failure),
                }
            }
        }
    }

    Booster {
        number,
        slots,
        failure: None,
    }
}

fn log_classified(logger: &RunLogger, pool: CardPool, set: &SetInfo, classified: &Classified) {
    for diagnostic in &classified.diagnostics {
        logger.normal(category::DIAGNOSTIC, &diagnostic.to_string());
    }

    let buckets = &classified.buckets;
    logger.minimal(
        category::SUMMARY,
        &format!("{} cards from {} ({}):", pool.label(), set.full_name, buckets.in_set),
    );
    for classification in Classification::ALL {
        let bucket = buckets.bucket(classification);
        logger.minimal(
            category::SUMMARY,
            &format!("{} {classification}", bucket.len()),
        );
        if !bucket.is_empty() {
            logger.verbose(
                category::TRACE,
                &format!(
                    "  {classification}: {}",
                    bucket.iter().map(CardName::as_str).collect::<Vec<_>>().join(", ")
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardRecord, RarityCounts};
    use crate::logger::VerbosityLevel;

    fn store_with(distribution: Option<RarityCounts>) -> RecordStore {
        let mut store = RecordStore::new();
        store.add_set(crate::core::SetInfo::new("AB", "Alpha Beta"));
        for i in 0..3 {
            store.add_card(CardRecord::new(format!("Vamp {i}"), "AB:V", CardPool::Limited));
        }
        store.add_card(CardRecord::new("Starter", "AB:P", CardPool::Limited));
        for (tag, n) in [("C", 10), ("U", 4), ("R", 2)] {
            for i in 0..n {
                store.add_card(CardRecord::new(
                    format!("{tag} card {i}"),
                    format!("Old:C, AB:{tag}"),
                    CardPool::Unlimited,
                ));
            }
        }
        if let Some(counts) = distribution {
            store.add_distribution(BoosterDistribution::new("AB", counts));
        }
        store
    }

    #[test]
    fn test_generate_tallies_every_draw() {
        let store = store_with(Some(RarityCounts::new(8, 1, 2, 1)));
        let logger = RunLogger::capturing(VerbosityLevel::Normal);
        let config = GeneratorConfig::new("ab", 5).with_seed(42);

        let report = generate(&store, &config, &logger).unwrap();

        assert_eq!(report.boosters.len(), 5);
        assert!(report.boosters.iter().all(Booster::is_complete));
        assert_eq!(report.total_draws(), 60);
        assert_eq!(report.seed, 42);
        assert_eq!(report.pools.vampire.len(), 4); // 3 vampires + 1 preconstructed
        assert!(logger.logs().iter().any(|e| e.message.starts_with("Booster #5:")));
    }

    #[test]
    fn test_preconstructed_crypt_card_without_vampire_slot() {
        let store = store_with(Some(RarityCounts::new(8, 0, 2, 1)));
        let logger = RunLogger::capturing(VerbosityLevel::Silent);
        let report = generate(&store, &GeneratorConfig::new("AB", 1).with_seed(1), &logger).unwrap();

        let starter = CardName::new("Starter");
        assert!(report.pools.uncommon.contains(&starter));
        assert!(!report.pools.vampire.contains(&starter));
    }

    #[test]
    fn test_unknown_set() {
        let store = store_with(None);
        let logger = RunLogger::capturing(VerbosityLevel::Silent);
        let err = generate(&store, &GeneratorConfig::new("Nope", 1), &logger).unwrap_err();
        assert!(matches!(err, BoosterError::UnknownSet(s) if s == "Nope"));
    }

    #[test]
    fn test_zero_boosters_rejected() {
        let store = store_with(Some(RarityCounts::new(8, 1, 2, 1)));
        let logger = RunLogger::capturing(VerbosityLevel::Silent);
        let err = generate(&store, &GeneratorConfig::new("AB", 0), &logger).unwrap_err();
        assert!(matches!(err, BoosterError::InvalidBoosterCount(_)));
    }

    #[test]
    fn test_missing_distribution() {
        let store = store_with(None);
        let logger = RunLogger::capturing(VerbosityLevel::Normal);
        let err = generate(&store, &GeneratorConfig::new("AB", 3), &logger).unwrap_err();

        assert!(matches!(err, BoosterError::MissingDistribution(s) if s == "AB"));
        assert!(logger.logs().in_category(category::BOOSTER).is_empty());
    }

    #[test]
    fn test_insufficient_pool_marks_booster_incomplete() {
        // Only 2 rares exist
        let store = store_with(Some(RarityCounts::new(8, 1, 2, 3)));
        let logger = RunLogger::capturing(VerbosityLevel::Normal);
        let report = generate(&store, &GeneratorConfig::new("AB", 2).with_seed(3), &logger).unwrap();

        assert_eq!(report.incomplete_boosters(), 2);
        let booster = &report.boosters[0];
        assert_eq!(
            booster.failure,
            Some(InsufficientPool {
                rarity: Rarity::Rare,
                requested: 3,
                available: 2
            })
        );
        assert_eq!(booster.slot(Rarity::Common).map(<[_]>::len), Some(8));
        assert!(booster.slot(Rarity::Rare).is_none());
        assert!(report.tally.is_empty());
        assert!(!logger.logs().in_category(category::DIAGNOSTIC).is_empty());
    }

    #[test]
    fn test_strict_run_aborts_on_insufficient_pool() {
        let store = store_with(Some(RarityCounts::new(20, 1, 2, 1)));
        let logger = RunLogger::capturing(VerbosityLevel::Silent);
        let config = GeneratorConfig::new("AB", 2).with_seed(3).strict(true);

        let err = generate(&store, &config, &logger).unwrap_err();
        assert!(matches!(
            err,
            BoosterError::InsufficientPool(InsufficientPool {
                rarity: Rarity::Common,
                ..
            })
        ));
    }

    #[test]
    fn test_booster_describe() {
        let booster = Booster {
            number: 2,
            slots: vec![
                SlotDraw {
                    rarity: Rarity::Common,
                    cards: vec![CardName::new("A"), CardName::new("B")],
                },
                SlotDraw {
                    rarity: Rarity::Vampire,
                    cards: vec![CardName::new("V")],
                },
            ],
            failure: None,
        };
        let text = booster.describe();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Booster #2:");
        assert_eq!(lines[1], "Vampires:  [V]");
        assert_eq!(lines[2], "Commons:   [A, B]");
        assert_eq!(lines[3], "Uncommons: -");
    }
}
