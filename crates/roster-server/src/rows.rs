//! Conversion of store rows to dynamic JSON objects.
//!
//! The column set mirrors whatever the store returns; it is not re-validated
//! against the employee model.

use chrono::NaiveDate;
use serde_json::{Map, Number, Value};
use tokio_postgres::types::Type;
use tokio_postgres::Row;

pub fn rows_to_json(rows: &[Row]) -> Result<Vec<Map<String, Value>>, tokio_postgres::Error> {
    rows.iter().map(row_to_json).collect()
}

pub fn row_to_json(row: &Row) -> Result<Map<String, Value>, tokio_postgres::Error> {
    let mut obj = Map::new();
    for (idx, column) in row.columns().iter().enumerate() {
        obj.insert(column.name().to_string(), column_value(row, idx, column.type_())?);
    }
    Ok(obj)
}

fn column_value(
    row: &Row,
    idx: usize,
    col_type: &Type,
) -> Result<Value, tokio_postgres::Error> {
    let value = if *col_type == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)?.map(Value::from)
    } else if *col_type == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)?.map(Value::from)
    } else if *col_type == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)?.map(Value::from)
    } else if *col_type == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx)?
            .and_then(|f| Number::from_f64(f).map(Value::Number))
    } else if *col_type == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)?
            .and_then(|f| Number::from_f64(f as f64).map(Value::Number))
    } else if *col_type == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx)?.map(Value::from)
    } else if *col_type == Type::DATE {
        row.try_get::<_, Option<NaiveDate>>(idx)?
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
    } else {
        // TEXT, VARCHAR, and anything else textual.
        row.try_get::<_, Option<String>>(idx)?.map(Value::String)
    };
    Ok(value.unwrap_or(Value::Null))
}
