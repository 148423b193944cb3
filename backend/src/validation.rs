//! Expense schema applied at the storage boundary.
//!
//! Create payloads arrive as loose JSON. This module coerces them into a
//! typed [`NewExpense`] or rejects them with a validation error. Coercion is
//! the only validation performed: amounts may be negative or zero, months are
//! not checked against any format and categories are free-form.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::error::{ExpenseError, Result};

/// A create payload after coercion, before an id and default date are assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub user_id: String,
    pub month: String,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// Coerce a JSON create payload into a [`NewExpense`]
pub fn parse_new_expense(payload: &Value) -> Result<NewExpense> {
    let fields = payload
        .as_object()
        .ok_or_else(|| ExpenseError::validation("expense payload must be a JSON object"))?;

    Ok(NewExpense {
        user_id: required(fields, "userId", coerce_string)?,
        month: required(fields, "month", coerce_string)?,
        category: required(fields, "category", coerce_string)?,
        amount: required(fields, "amount", coerce_number)?,
        description: optional(fields, "description", coerce_string)?,
        date: optional(fields, "date", coerce_date)?,
    })
}

type Coerce<T> = fn(&Value, &str) -> Result<T>;

fn required<T>(fields: &Map<String, Value>, path: &str, coerce: Coerce<T>) -> Result<T> {
    optional(fields, path, coerce)?
        .ok_or_else(|| ExpenseError::validation(format!("Path `{}` is required", path)))
}

/// Missing keys and explicit nulls are both treated as absent
fn optional<T>(fields: &Map<String, Value>, path: &str, coerce: Coerce<T>) -> Result<Option<T>> {
    match fields.get(path) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => coerce(value, path).map(Some),
    }
}

fn cast_error(kind: &str, value: &Value, path: &str) -> ExpenseError {
    ExpenseError::validation(format!(
        "Cast to {} failed for value {} at path \"{}\"",
        kind, value, path
    ))
}

fn coerce_string(value: &Value, path: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(cast_error("string", value, path)),
    }
}

fn coerce_number(value: &Value, path: &str) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| cast_error("Number", value, path))
}

/// Accepts RFC 3339 timestamps, plain `YYYY-MM-DD` dates (midnight UTC) and
/// epoch milliseconds. The UTC year must have four digits so the stored text
/// reads back as RFC 3339.
fn coerce_date(value: &Value, path: &str) -> Result<DateTime<Utc>> {
    let parsed = match value {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|naive| Utc.from_utc_datetime(&naive))
                })
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    };

    parsed
        .filter(|dt| (0..=9999).contains(&dt.year()))
        .ok_or_else(|| cast_error("date", value, path))
}
