//! Booster generation pipeline
//!
//! classify → reconcile → draw → tally, one set per run.

pub mod classify;
pub mod pools;
pub mod run;
pub mod sampler;
pub mod tally;

pub use classify::{classify, Classified, Diagnostic, RarityBuckets};
pub use pools::{reconcile, BoosterPools};
pub use run::{draw_booster, generate, Booster, GeneratorConfig, RunReport, SlotDraw, DEFAULT_OUTPUT};
pub use sampler::{BoosterSampler, InsufficientPool};
pub use tally::DrawTally;
