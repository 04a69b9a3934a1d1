//! Table loaders
//!
//! Parser for the comma-separated card tables and the record store built
//! from them.

pub mod store;
pub mod table;

pub use store::{CardTable, RecordStore};
pub use table::{Row, Table};
