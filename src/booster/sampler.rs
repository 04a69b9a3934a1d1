//! Random draws for booster slots
//!
//! One RNG per run, seeded once. Within a booster a slot never repeats a
//! pool position; separate boosters draw independently.

use crate::core::{CardName, Rarity};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::Serialize;
use thiserror::Error;

/// A slot asked for more cards than its pool holds
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[error("Insufficient {rarity} pool: requested {requested}, only {available} available")]
pub struct InsufficientPool {
    pub rarity: Rarity,
    pub requested: usize,
    pub available: usize,
}

/// Seeded sampler shared by every booster of a run
pub struct BoosterSampler {
    rng: ChaCha12Rng,
    seed: u64,
}

impl BoosterSampler {
    /// Sampler seeded from system entropy
    pub fn new() -> Self {
        Self::with_seed(rand::thread_rng().gen())
    }

    /// Sampler with a fixed seed (for reproducible runs)
    pub fn with_seed(seed: u64) -> Self {
        BoosterSampler {
            rng: ChaCha12Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw `count` cards from distinct positions of `pool`
    ///
    /// Never returns fewer cards than asked for: a pool smaller than
    /// `count` is an error. Output order is unspecified.
    pub fn draw(
        &mut self,
        pool: &[CardName],
        rarity: Rarity,
        count: usize,
    ) -> std::result::Result<Vec<CardName>, InsufficientPool> {
        if count > pool.len() {
            return Err(InsufficientPool {
                rarity,
                requested: count,
                available: pool.len(),
            });
        }
        Ok(pool.choose_multiple(&mut self.rng, count).cloned().collect())
    }
}

impl Default for BoosterSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<CardName> {
        (0..n).map(|i| CardName::new(format!("card {i}"))).collect()
    }

    #[test]
    fn test_draw_exact_count_of_distinct_positions() {
        let pool = pool(10);
        let mut sampler = BoosterSampler::with_seed(42);

        for count in 0..=10 {
            let drawn = sampler.draw(&pool, Rarity::Common, count).unwrap();
            assert_eq!(drawn.len(), count);
            let distinct: HashSet<_> = drawn.iter().collect();
            assert_eq!(distinct.len(), count);
            assert!(drawn.iter().all(|c| pool.contains(c)));
        }
    }

    #[test]
    fn test_draw_more_than_pool_fails() {
        let pool = pool(3);
        let mut sampler = BoosterSampler::with_seed(7);

        for count in 4..8 {
            let err = sampler.draw(&pool, Rarity::Rare, count).unwrap_err();
            assert_eq!(
                err,
                InsufficientPool {
                    rarity: Rarity::Rare,
                    requested: count,
                    available: 3
                }
            );
        }
        assert!(sampler.draw(&[], Rarity::Vampire, 1).is_err());
        assert!(sampler.draw(&[], Rarity::Vampire, 0).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_pool_entries_may_repeat() {
        let pool = vec![CardName::new("Same"), CardName::new("Same")];
        let mut sampler = BoosterSampler::with_seed(1);
        let drawn = sampler.draw(&pool, Rarity::Common, 2).unwrap();
        assert_eq!(drawn, pool);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let pool = pool(50);
        let mut a = BoosterSampler::with_seed(1234);
        let mut b = BoosterSampler::with_seed(1234);
        for _ in 0..5 {
            assert_eq!(
                a.draw(&pool, Rarity::Common, 8).unwrap(),
                b.draw(&pool, Rarity::Common, 8).unwrap()
            );
        }
        assert_eq!(a.seed(), 1234);
    }

    #[test]
    fn test_error_message() {
        let err = InsufficientPool {
            rarity: Rarity::Uncommon,
            requested: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient Uncommon pool: requested 2, only 1 available"
        );
    }
}
