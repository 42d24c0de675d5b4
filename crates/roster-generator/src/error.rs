//! Error types for the dataset generator.

use thiserror::Error;

/// Errors that can occur while emitting the dataset.
///
/// All of these are fatal: the run aborts and the partial output file is
/// left in place.
#[derive(Error, Debug)]
pub enum EmitError {
    /// The output sink cannot accept further data (disk full, permissions).
    #[error("sink I/O error: {0}")]
    Sink(#[from] std::io::Error),

    /// A record failed to serialize.
    #[error("record serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The background writer terminated unexpectedly.
    #[error("writer terminated: {0}")]
    WriterLost(String),

    /// The sink was used after it was closed.
    #[error("sink already closed")]
    Closed,
}
