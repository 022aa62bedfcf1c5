//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. Timestamps are written in one fixed-width RFC 3339 form so that
//! string comparison in SQL matches chronological order; reads also accept
//! `SQLite`'s `datetime('now')` format.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Render a timestamp for storage: `2026-02-09T14:30:00.000000Z`.
#[must_use]
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
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

/// Read a non-negative INTEGER column as `u32`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the stored value does not fit.
pub fn get_u32(row: &libsql::Row, idx: i32) -> Result<u32, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u32::try_from(raw)
        .map_err(|_| DatabaseError::InvalidState(format!("column {idx} out of range: {raw}")))
}

/// Read a count column as `u64`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for negative values.
pub fn get_count(row: &libsql::Row, idx: i32) -> Result<u64, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u64::try_from(raw)
        .map_err(|_| DatabaseError::InvalidState(format!("negative count in column {idx}: {raw}")))
}

/// Read a 0/1 INTEGER column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_flag(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn formatted_timestamps_sort_chronologically() {
        let base = Utc.with_ymd_and_hms(2026, 2, 9, 14, 30, 0).unwrap();
        let a = format_datetime(base);
        let b = format_datetime(base + Duration::microseconds(1));
        let c = format_datetime(base + Duration::days(400));
        assert!(a < b && b < c);
        assert_eq!(a, "2026-02-09T14:30:00.000000Z");
    }

    #[test]
    fn parses_both_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 2, 9, 14, 30, 0).unwrap();
        assert_eq!(parse_datetime("2026-02-09T14:30:00+00:00").unwrap(), expected);
        assert_eq!(parse_datetime("2026-02-09 14:30:00").unwrap(), expected);
        assert_eq!(parse_datetime(&format_datetime(expected)).unwrap(), expected);
        assert!(parse_datetime("yesterday").is_err());
    }
}
