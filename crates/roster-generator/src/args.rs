//! CLI argument definitions for the generate command.

use crate::sink::DEFAULT_QUEUE_DEPTH;
use clap::Args;
use std::path::PathBuf;

/// Arguments for generating an NDJSON employee dataset.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Output NDJSON file path
    #[arg(long, short = 'o', default_value = "data/employees.json")]
    pub output: PathBuf,

    /// Number of records to generate
    #[arg(long, default_value = "10000000")]
    pub total_records: u64,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Record lines buffered in flight between producer and writer
    #[arg(long, default_value_t = DEFAULT_QUEUE_DEPTH)]
    pub queue_depth: usize,
}
