//! Record store: the immutable snapshot of all loaded tables
//!
//! Built once by the load step and passed by reference to the classifier,
//! the run driver and the lookup prompt.

use crate::core::{
    BoosterDistribution, CardName, CardPool, CardRecord, Rarity, RarityCounts, SetAbbrev, SetInfo,
};
use crate::loader::table::Table;
use crate::{BoosterError, Result};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

pub const CRYPT_FILE: &str = "vtescrypt.csv";
pub const LIBRARY_FILE: &str = "vteslib.csv";
pub const SETS_FILE: &str = "vtessets.csv";
pub const BOOSTERS_FILE: &str = "vtesboosters.csv";

/// Cards of one pool in table order, with an index by identifier
#[derive(Debug, Clone)]
pub struct CardTable {
    pool: CardPool,
    cards: Vec<CardRecord>,
    index: FxHashMap<CardName, usize>,
}

impl CardTable {
    pub fn new(pool: CardPool) -> Self {
        CardTable {
            pool,
            cards: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn pool(&self) -> CardPool {
        self.pool
    }

    /// Add a card; a repeated identifier keeps its first position and takes the new record
    pub fn insert(&mut self, card: CardRecord) {
        debug_assert_eq!(card.pool, self.pool);
        match self.index.get(&card.name) {
            Some(&i) => self.cards[i] = card,
            None => {
                self.index.insert(card.name.clone(), self.cards.len());
                self.cards.push(card);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CardRecord> {
        self.index.get(name).map(|&i| &self.cards[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CardRecord> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// All reference data needed for a run
#[derive(Debug, Clone)]
pub struct RecordStore {
    crypt: CardTable,
    library: CardTable,
    sets: Vec<SetInfo>,
    distributions: FxHashMap<String, BoosterDistribution>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        RecordStore {
            crypt: CardTable::new(CardPool::Limited),
            library: CardTable::new(CardPool::Unlimited),
            sets: Vec::new(),
            distributions: FxHashMap::default(),
        }
    }

    /// Load the four tables from a resources directory
    ///
    /// Files are read concurrently; parsing starts once all four are in.
    pub async fn load(resources: &Path) -> Result<Self> {
        if !resources.is_dir() {
            return Err(BoosterError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Resources directory not found: {}", resources.display()),
            )));
        }

        let tasks = [CRYPT_FILE, LIBRARY_FILE, SETS_FILE, BOOSTERS_FILE]
            .map(|file| tokio::spawn(read_table_file(resources.join(file))));

        let mut contents = Vec::with_capacity(tasks.len());
        for task in tasks {
            contents.push(task.await??);
        }

        let crypt = Table::parse(CRYPT_FILE, &contents[0])?;
        let library = Table::parse(LIBRARY_FILE, &contents[1])?;
        let sets = Table::parse(SETS_FILE, &contents[2])?;
        let boosters = Table::parse(BOOSTERS_FILE, &contents[3])?;

        Self::from_tables(&crypt, &library, &sets, &boosters)
    }

    /// Build a store from already parsed tables
    pub fn from_tables(crypt: &Table, library: &Table, sets: &Table, boosters: &Table) -> Result<Self> {
        let mut store = RecordStore::new();

        for row in crypt.rows() {
            let name = crypt.require(row, "Name")?;
            let name = if row.get("Adv") == Some("Advanced") {
                CardName::advanced(name)
            } else {
                CardName::new(name)
            };
            let set_field = crypt.require(row, "Set")?;
            store.add_card(CardRecord::new(name, set_field, CardPool::Limited));
        }

        for row in library.rows() {
            let name = library.require(row, "Name")?;
            let set_field = library.require(row, "Set")?;
            store.add_card(CardRecord::new(name, set_field, CardPool::Unlimited));
        }

        for row in sets.rows() {
            let abbrev = sets.require(row, "Abbrev")?;
            let full_name = sets.require(row, "Full Name")?;
            store.add_set(SetInfo::new(abbrev, full_name));
        }

        for row in boosters.rows() {
            let set = boosters.require(row, "Set")?;
            let count = |rarity: Rarity| boosters.require_count(row, rarity.column());
            let counts = RarityCounts::new(
                count(Rarity::Common)?,
                count(Rarity::Vampire)?,
                count(Rarity::Uncommon)?,
                count(Rarity::Rare)?,
            );
            store.add_distribution(BoosterDistribution::new(set, counts));
        }

        Ok(store)
    }

    /// Add a single card to the table of its pool
    pub fn add_card(&mut self, card: CardRecord) {
        match card.pool {
            CardPool::Limited => self.crypt.insert(card),
            CardPool::Unlimited => self.library.insert(card),
        }
    }

    /// Add a set; a repeated abbreviation replaces the earlier entry in place
    pub fn add_set(&mut self, set: SetInfo) {
        match self.sets.iter_mut().find(|s| s.abbrev == set.abbrev) {
            Some(existing) => *existing = set,
            None => self.sets.push(set),
        }
    }

    pub fn add_distribution(&mut self, distribution: BoosterDistribution) {
        self.distributions
            .insert(distribution.set.as_str().to_lowercase(), distribution);
    }

    pub fn cards(&self, pool: CardPool) -> &CardTable {
        match pool {
            CardPool::Limited => &self.crypt,
            CardPool::Unlimited => &self.library,
        }
    }

    pub fn crypt(&self) -> &CardTable {
        &self.crypt
    }

    pub fn library(&self) -> &CardTable {
        &self.library
    }

    /// Sets in table order
    pub fn sets(&self) -> &[SetInfo] {
        &self.sets
    }

    /// Resolve user input to a set: abbreviation first, then full name
    ///
    /// Both comparisons ignore case.
    pub fn resolve_set(&self, input: &str) -> Option<&SetInfo> {
        let input = input.trim();
        self.sets
            .iter()
            .find(|s| s.abbrev.matches(input))
            .or_else(|| self.sets.iter().find(|s| s.full_name_matches(input)))
    }

    /// Booster distribution of a set, if one is defined
    pub fn distribution(&self, set: &SetAbbrev) -> Option<&BoosterDistribution> {
        self.distributions.get(&set.as_str().to_lowercase())
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_table_file(path: PathBuf) -> Result<String> {
    tokio::fs::read_to_string(&path).await.map_err(|e| {
        BoosterError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {e}", path.display()),
        ))
    })
}
