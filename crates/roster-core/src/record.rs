//! The employee record produced by the synthesizer and stored in PostgreSQL.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One synthesized employee.
///
/// Field declaration order is the wire order: NDJSON lines and INSERT column
/// lists both follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Dense, strictly increasing within one generation run (1..=N).
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub dob: NaiveDate,
    /// `Room-<3-digit>` token, room number in [100, 999].
    pub hostel_room: String,
    /// `<3-digit>-<2-digit>-<4-digit>` token. Format only, no uniqueness.
    pub ssn: String,
    pub department: String,
    pub designation: String,
    pub salary: i32,
    pub years_of_service: i32,
}
