//! Reconciliation of crypt and library buckets into booster pools

use crate::booster::classify::RarityBuckets;
use crate::core::{BoosterDistribution, CardName, Rarity};
use serde::Serialize;

/// Flat per-rarity pools a booster draws from
///
/// A card may appear twice in one pool only if it came from both source
/// pools; vampire cards come from the crypt alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoosterPools {
    pub vampire: Vec<CardName>,
    pub common: Vec<CardName>,
    pub uncommon: Vec<CardName>,
    pub rare: Vec<CardName>,
}

impl BoosterPools {
    pub fn pool(&self, rarity: Rarity) -> &[CardName] {
        match rarity {
            Rarity::Common => &self.common,
            Rarity::Vampire => &self.vampire,
            Rarity::Uncommon => &self.uncommon,
            Rarity::Rare => &self.rare,
        }
    }

    pub fn total(&self) -> usize {
        self.vampire.len() + self.common.len() + self.uncommon.len() + self.rare.len()
    }
}

/// Merge limited (crypt) and unlimited (library) buckets
///
/// Library preconstructed cards always count as uncommon. Crypt
/// preconstructed cards join the vampire pool, or the uncommon pool when
/// the set's boosters have no vampire slot. Library cards tagged as
/// vampires are left out.
pub fn reconcile(
    limited: &RarityBuckets,
    unlimited: &RarityBuckets,
    distribution: &BoosterDistribution,
) -> BoosterPools {
    let mut pools = BoosterPools {
        vampire: limited.vampire.clone(),
        common: concat(&limited.common, &unlimited.common),
        uncommon: concat(&limited.uncommon, &unlimited.uncommon),
        rare: concat(&limited.rare, &unlimited.rare),
    };

    pools.uncommon.extend_from_slice(&unlimited.preconstructed);

    if distribution.has_vampire_slot() {
        pools.vampire.extend_from_slice(&limited.preconstructed);
    } else {
        pools.uncommon.extend_from_slice(&limited.preconstructed);
    }

    pools
}

fn concat(a: &[CardName], b: &[CardName]) -> Vec<CardName> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RarityCounts;

    fn names(list: &[&str]) -> Vec<CardName> {
        list.iter().map(|n| CardName::new(*n)).collect()
    }

    fn crypt_buckets() -> RarityBuckets {
        RarityBuckets {
            common: names(&["cc"]),
            vampire: names(&["cv1", "cv2"]),
            uncommon: names(&["cu"]),
            rare: names(&["cr"]),
            preconstructed: names(&["cp"]),
            in_set: 6,
        }
    }

    fn library_buckets() -> RarityBuckets {
        RarityBuckets {
            common: names(&["lc1", "lc2"]),
            vampire: names(&["lv"]),
            uncommon: names(&["lu"]),
            rare: names(&["lr"]),
            preconstructed: names(&["lp"]),
            in_set: 6,
        }
    }

    #[test]
    fn test_reconcile_with_vampire_slot() {
        let dist = BoosterDistribution::new("KoT", RarityCounts::new(8, 1, 2, 1));
        let pools = reconcile(&crypt_buckets(), &library_buckets(), &dist);

        assert_eq!(pools.vampire, names(&["cv1", "cv2", "cp"]));
        assert_eq!(pools.common, names(&["cc", "lc1", "lc2"]));
        assert_eq!(pools.uncommon, names(&["cu", "lu", "lp"]));
        assert_eq!(pools.rare, names(&["cr", "lr"]));
    }

    #[test]
    fn test_reconcile_without_vampire_slot() {
        let dist = BoosterDistribution::new("AB", RarityCounts::new(11, 0, 3, 1));
        let pools = reconcile(&crypt_buckets(), &library_buckets(), &dist);

        assert_eq!(pools.vampire, names(&["cv1", "cv2"]));
        assert_eq!(pools.uncommon, names(&["cu", "lu", "lp", "cp"]));
    }

    #[test]
    fn test_reconcile_drops_nothing_but_library_vampires() {
        let crypt = crypt_buckets();
        let library = library_buckets();
        for vampires in [0, 1] {
            let dist = BoosterDistribution::new("KoT", RarityCounts::new(8, vampires, 2, 1));
            let pools = reconcile(&crypt, &library, &dist);
            assert_eq!(
                pools.total(),
                crypt.total() + library.total() - library.vampire.len()
            );
        }
    }

    #[test]
    fn test_pool_by_rarity() {
        let dist = BoosterDistribution::new("KoT", RarityCounts::new(8, 1, 2, 1));
        let pools = reconcile(&crypt_buckets(), &library_buckets(), &dist);
        assert_eq!(pools.pool(Rarity::Rare).len(), 2);
        assert_eq!(pools.pool(Rarity::Vampire).len(), 3);
    }
}
