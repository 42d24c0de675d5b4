//! Paged listing and creation of employees.

use crate::error::ServerError;
use crate::executor::{execute, QueryMetrics, QueryOutcome};
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Fixed page size. Not caller-supplied: contrary input is ignored rather
/// than allowing unbounded scans.
pub const PAGE_SIZE: i64 = 50;

/// Lenient page parsing: anything missing, malformed, or below 1 becomes
/// page 1.
pub(crate) fn parse_page(params: &HashMap<String, String>) -> i64 {
    params
        .get("page")
        .and_then(|p| p.parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// `nextPage` is `page + 1` only when the page came back full; a short page
/// means the listing is exhausted. A page that is exactly full and also last
/// costs one harmless empty follow-up request.
pub(crate) fn next_page(page: i64, returned: usize) -> Option<i64> {
    (returned as i64 == PAGE_SIZE).then_some(page + 1)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope {
    pub result: Vec<Map<String, Value>>,
    pub metrics: QueryMetrics,
    pub page: i64,
    pub next_page: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PageEnvelope>, ServerError> {
    let page = parse_page(&params);
    let offset = (page - 1) * PAGE_SIZE;

    let statement = format!(
        "SELECT * FROM employees ORDER BY id {} LIMIT $1 OFFSET $2",
        state.profile.order_sql()
    );
    let QueryOutcome { result, metrics } =
        execute(&state.pool, &statement, &[&PAGE_SIZE, &offset]).await?;

    let next_page = next_page(page, result.len());
    Ok(Json(PageEnvelope {
        result,
        metrics,
        page,
        next_page,
    }))
}

/// Incoming create body. Every field is optional: absent fields become SQL
/// NULLs, leaving the store's constraints to reject incomplete records.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    pub id: Option<i64>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub dob: Option<NaiveDate>,
    pub hostel_room: Option<String>,
    pub ssn: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<i32>,
    pub years_of_service: Option<i32>,
}

const INSERT_SQL: &str = "INSERT INTO employees \
    (id, firstname, lastname, dob, hostel_room, ssn, department, designation, salary, years_of_service) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)";

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewEmployee>,
) -> Result<(StatusCode, Json<Value>), ServerError> {
    let client = state.pool.get().await?;
    client
        .execute(
            INSERT_SQL,
            &[
                &body.id,
                &body.firstname,
                &body.lastname,
                &body.dob,
                &body.hostel_room,
                &body.ssn,
                &body.department,
                &body.designation,
                &body.salary,
                &body.years_of_service,
            ],
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Employee created" })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_page_defaults_to_one() {
        assert_eq!(parse_page(&params(&[])), 1);
        assert_eq!(parse_page(&params(&[("page", "abc")])), 1);
        assert_eq!(parse_page(&params(&[("page", "0")])), 1);
        assert_eq!(parse_page(&params(&[("page", "-3")])), 1);
    }

    #[test]
    fn test_parse_page_accepts_valid_pages() {
        assert_eq!(parse_page(&params(&[("page", "1")])), 1);
        assert_eq!(parse_page(&params(&[("page", "42")])), 42);
    }

    #[test]
    fn test_page_size_attempts_are_ignored() {
        let p = params(&[("page", "2"), ("limit", "5000"), ("pageSize", "5000")]);
        assert_eq!(parse_page(&p), 2);
    }

    #[test]
    fn test_next_page_rule() {
        // Full page: there may be more.
        assert_eq!(next_page(1, PAGE_SIZE as usize), Some(2));
        assert_eq!(next_page(7, PAGE_SIZE as usize), Some(8));
        // Short or empty page: the listing is exhausted.
        assert_eq!(next_page(1, 0), None);
        assert_eq!(next_page(3, 49), None);
    }

    #[test]
    fn test_new_employee_accepts_missing_fields() {
        // A body without `id` must deserialize; the store, not serde, is
        // what rejects the NULL primary key.
        let body: NewEmployee =
            serde_json::from_str(r#"{"firstname": "Zzyx", "salary": 50000}"#).unwrap();
        assert!(body.id.is_none());
        assert_eq!(body.firstname.as_deref(), Some("Zzyx"));
        assert_eq!(body.salary, Some(50000));
        assert!(body.dob.is_none());
    }
}
