//! The two competing search strategies over the same logical predicate.
//!
//! Both match one term against every textual column plus a string cast of
//! salary and return the same envelope. The unoptimized path exists as a
//! measured worst-case baseline, not as a production search.

use crate::error::ServerError;
use crate::executor::{execute, round_ms, QueryMetrics, QueryOutcome};
use crate::rows::rows_to_json;
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use std::collections::HashMap;
use std::time::Instant;

const FORCED_SCAN_SQL: &str = "SELECT * FROM employees WHERE \
    firstname ILIKE $1 OR lastname ILIKE $1 OR department ILIKE $1 OR \
    hostel_room ILIKE $1 OR designation ILIKE $1 OR salary::text ILIKE $1 OR \
    ssn ILIKE $1";

const INDEX_ASSISTED_SQL: &str = "SELECT * FROM employees WHERE \
    LOWER(firstname) LIKE $1 OR LOWER(lastname) LIKE $1 OR \
    LOWER(department) LIKE $1 OR LOWER(hostel_room) LIKE $1 OR \
    salary::text LIKE $1 OR LOWER(designation) LIKE $1 OR LOWER(ssn) LIKE $1";

/// Planner hints for the forced-scan path. SET LOCAL keeps them
/// transaction-scoped: they die with the transaction and cannot leak into
/// later queries on the pooled connection.
const FORCE_SEQSCAN_HINTS: &str = "SET LOCAL enable_seqscan = ON; \
    SET LOCAL enable_indexscan = OFF; \
    SET LOCAL enable_bitmapscan = OFF";

/// `%term%`: case-insensitive substring. Defeats prefix indexes by design.
pub(crate) fn substring_pattern(term: &str) -> String {
    format!("%{term}%")
}

/// `term%` after case folding: lines up with the precomputed `LOWER(col)`
/// prefix indexes.
pub(crate) fn prefix_pattern(term: &str) -> String {
    format!("{}%", term.to_lowercase())
}

/// The search term is required; a missing or blank `q` is rejected before
/// the store is touched.
fn require_term(params: &HashMap<String, String>) -> Result<String, ServerError> {
    match params.get("q") {
        Some(q) if !q.trim().is_empty() => Ok(q.clone()),
        _ => Err(ServerError::Validation(
            "missing required query parameter 'q'".to_string(),
        )),
    }
}

/// Forced full scan: BEGIN, transaction-local planner hints, substring
/// SELECT, COMMIT — all on one borrowed connection. On any failure the
/// transaction rolls back (drop) before the error propagates.
pub async fn unoptimized(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<QueryOutcome>, ServerError> {
    let term = require_term(&params)?;
    let pattern = substring_pattern(&term);

    let mut client = state.pool.get().await?;

    let start = Instant::now();
    let tx = client.transaction().await?;
    tx.batch_execute(FORCE_SEQSCAN_HINTS).await?;
    let rows = tx.query(FORCED_SCAN_SQL, &[&pattern]).await?;
    tx.commit().await?;
    let elapsed = start.elapsed();

    let result = rows_to_json(&rows)?;
    tracing::debug!(
        "forced-scan search for {:?}: {} rows in {}ms",
        term,
        result.len(),
        round_ms(elapsed)
    );
    Ok(Json(QueryOutcome {
        metrics: QueryMetrics::unindexed_baseline(result.len(), elapsed),
        result,
    }))
}

/// Index-assisted search: case-folded prefix match, no planner hints, timed
/// by the shared executor.
pub async fn optimized(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<QueryOutcome>, ServerError> {
    let term = require_term(&params)?;
    let pattern = prefix_pattern(&term);

    let outcome = execute(&state.pool, INDEX_ASSISTED_SQL, &[&pattern]).await?;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    // LIKE semantics mirrored in plain Rust, for reasoning about the
    // patterns without a store.
    fn matches_substring(value: &str, term: &str) -> bool {
        value.to_lowercase().contains(&term.to_lowercase())
    }

    fn matches_prefix(value: &str, term: &str) -> bool {
        value.to_lowercase().starts_with(&term.to_lowercase())
    }

    #[test]
    fn test_pattern_construction() {
        assert_eq!(substring_pattern("zy"), "%zy%");
        assert_eq!(prefix_pattern("Zz"), "zz%");
        assert_eq!(prefix_pattern("ENGINEERING"), "engineering%");
    }

    #[test]
    fn test_mid_word_term_hits_substring_but_not_prefix() {
        // One record has firstname "Zzyx" and nothing else matches.
        assert!(matches_substring("Zzyx", "zy"));
        assert!(!matches_prefix("Zzyx", "zy"));
        assert!(matches_prefix("Zzyx", "Zz"));
    }

    #[test]
    fn test_prefix_matches_are_a_subset_of_substring_matches() {
        let values = ["Engineering", "Room-512", "123-45-6789", "Zzyx", "VP"];
        let terms = ["eng", "room", "512", "45", "zz", "v"];
        for value in values {
            for term in terms {
                if matches_prefix(value, term) {
                    assert!(matches_substring(value, term), "{value} / {term}");
                }
            }
        }
    }

    #[test]
    fn test_both_statements_cover_the_same_columns() {
        for column in ["firstname", "lastname", "department", "hostel_room", "designation", "ssn"] {
            assert!(FORCED_SCAN_SQL.contains(&format!("{column} ILIKE $1")));
            assert!(INDEX_ASSISTED_SQL.contains(&format!("LOWER({column}) LIKE $1")));
        }
        assert!(FORCED_SCAN_SQL.contains("salary::text ILIKE $1"));
        assert!(INDEX_ASSISTED_SQL.contains("salary::text LIKE $1"));
    }

    #[test]
    fn test_planner_hints_are_transaction_local() {
        assert_eq!(FORCE_SEQSCAN_HINTS.matches("SET LOCAL").count(), 3);
        assert!(!FORCE_SEQSCAN_HINTS.contains("SET SESSION"));
        assert!(FORCE_SEQSCAN_HINTS.contains("enable_seqscan = ON"));
        assert!(FORCE_SEQSCAN_HINTS.contains("enable_indexscan = OFF"));
        assert!(FORCE_SEQSCAN_HINTS.contains("enable_bitmapscan = OFF"));
    }

    #[test]
    fn test_require_term() {
        let mut params = HashMap::new();
        assert!(require_term(&params).is_err());

        params.insert("q".to_string(), "".to_string());
        assert!(require_term(&params).is_err());

        params.insert("q".to_string(), "   ".to_string());
        assert!(require_term(&params).is_err());

        params.insert("q".to_string(), "zy".to_string());
        assert_eq!(require_term(&params).unwrap(), "zy");
    }
}
