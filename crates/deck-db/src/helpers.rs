//! Row-to-entity parsing helpers.
//!
//! Timestamps are written by [`format_datetime`] and read back by
//! [`parse_datetime`], which also accepts `SQLite`'s `datetime('now')` form.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::DatabaseError;

/// Fixed-width RFC 3339 (`2025-10-15T09:30:00.000000Z`) so text ordering
/// matches time ordering.
#[must_use]
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time at storage precision, so entities built in memory compare
/// equal to the rows read back.
#[must_use]
pub fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Decode a JSON array column (`dependencies`, `tags`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the text is not a JSON array of `T`.
pub fn parse_json_list<T: serde::de::DeserializeOwned>(s: &str) -> Result<Vec<T>, DatabaseError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(s)
        .map_err(|e| DatabaseError::Query(format!("Invalid JSON list in column: {e}")))
}

/// Encode a list for a JSON array column.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_json_list<T: serde::Serialize>(items: &[T]) -> Result<String, DatabaseError> {
    serde_json::to_string(items).map_err(|e| DatabaseError::Other(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use deck_core::enums::{Category, Priority};

    #[test]
    fn formatted_timestamps_sort_like_time() {
        let a = Utc.with_ymd_and_hms(2025, 10, 15, 9, 0, 0).unwrap();
        let b = a + chrono::Duration::microseconds(1500);
        assert!(format_datetime(a) < format_datetime(b));
        assert_eq!(parse_datetime(&format_datetime(b)).unwrap(), b);
    }

    #[test]
    fn parses_sqlite_default_format() {
        let dt = parse_datetime("2025-10-15 09:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 10, 15, 9, 30, 0).unwrap());
    }

    #[test]
    fn parses_stored_enum_spellings() {
        assert_eq!(parse_enum::<Priority>("CRITICAL").unwrap(), Priority::Critical);
        assert_eq!(parse_enum::<Category>("DevOps").unwrap(), Category::DevOps);
        assert!(parse_enum::<Priority>("urgent").is_err());
    }

    #[test]
    fn json_lists_tolerate_empty_text() {
        assert!(parse_json_list::<i64>("").unwrap().is_empty());
        assert_eq!(parse_json_list::<i64>("[3,1]").unwrap(), vec![3, 1]);
        assert!(parse_json_list::<i64>("{oops").is_err());
    }
}
