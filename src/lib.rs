//! VTES booster generator
//!
//! Classifies the crypt and library of Vampire: The Eternal Struggle by
//! rarity for one set, and draws randomized booster packs from the
//! resulting pools following the set's booster distribution.

pub mod booster;
pub mod core;
pub mod error;
pub mod loader;
pub mod logger;
pub mod lookup;
pub mod output;

pub use error::{BoosterError, Result};
