//! Error types for the booster generator

use crate::booster::InsufficientPool;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoosterError {
    #[error("Unknown set: {0}")]
    UnknownSet(String),

    #[error("Invalid booster count: {0} (expected a positive integer)")]
    InvalidBoosterCount(String),

    #[error("No booster distribution defined for set {0}")]
    MissingDistribution(String),

    #[error("Malformed table {table} at row {row}: {message}")]
    Table {
        table: String,
        row: usize,
        message: String,
    },

    #[error(transparent)]
    InsufficientPool(#[from] InsufficientPool),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, BoosterError>;
