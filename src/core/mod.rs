//! Core card pool types

pub mod card;
pub mod rarity;
pub mod set;
pub mod types;

pub use card::{CardPool, CardRecord, SetSegment};
pub use rarity::{BoosterDistribution, Classification, Rarity, RarityCounts};
pub use set::SetInfo;
pub use types::{CardName, SetAbbrev};
