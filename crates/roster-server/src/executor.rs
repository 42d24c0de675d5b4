//! Timed execution of single store operations on pooled connections.

use crate::error::ServerError;
use crate::rows::rows_to_json;
use deadpool_postgres::Pool;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tokio_postgres::types::ToSql;

/// Label attached to forced-scan timings so callers can tell the baseline
/// apart without relying on the numbers.
pub const UNINDEXED_BASELINE: &str = "server, unindexed baseline";

/// Row count plus wall-clock execution time for one store operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetrics {
    pub count: u64,
    /// Milliseconds, rounded to two decimals. Measured strictly around the
    /// query call; pool checkout time is excluded.
    pub execution_time_ms: f64,
    /// Present on the forced-scan path only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured: Option<&'static str>,
}

impl QueryMetrics {
    pub fn new(count: usize, elapsed: Duration) -> Self {
        Self {
            count: count as u64,
            execution_time_ms: round_ms(elapsed),
            measured: None,
        }
    }

    pub fn unindexed_baseline(count: usize, elapsed: Duration) -> Self {
        Self {
            measured: Some(UNINDEXED_BASELINE),
            ..Self::new(count, elapsed)
        }
    }
}

pub(crate) fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}

/// Rows (as dynamic JSON objects) plus metrics for one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub result: Vec<Map<String, Value>>,
    pub metrics: QueryMetrics,
}

/// Run one parameterized statement on a connection checked out for the
/// scope of this call.
pub async fn execute(
    pool: &Pool,
    statement: &str,
    params: &[&(dyn ToSql + Sync)],
) -> Result<QueryOutcome, ServerError> {
    let client = pool.get().await?;

    let start = Instant::now();
    let rows = client.query(statement, params).await?;
    let elapsed = start.elapsed();

    let result = rows_to_json(&rows)?;
    Ok(QueryOutcome {
        metrics: QueryMetrics::new(result.len(), elapsed),
        result,
    })
}
