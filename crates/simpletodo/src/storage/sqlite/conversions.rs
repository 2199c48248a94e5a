//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use uuid::Uuid;

use simpletodo_core::storage::Page;
use simpletodo_core::todo::{ItemState, TodoItem, TodoList};

/// Convert a SQLite row to a TodoList.
///
/// Expected columns: id, name, description, created_date, updated_date
pub fn row_to_list(row: &Row) -> rusqlite::Result<TodoList> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    let created_date: String = row.get(3)?;
    let updated_date: Option<String> = row.get(4)?;

    Ok(TodoList {
        id: parse_uuid(&id)?,
        name,
        description,
        created_date: parse_datetime(&created_date)?,
        updated_date: parse_optional_datetime(updated_date)?,
    })
}

/// Convert a SQLite row to a TodoItem.
///
/// Expected columns: id, list_id, name, description, state, due_date,
/// completed_date, created_date, updated_date
pub fn row_to_item(row: &Row) -> rusqlite::Result<TodoItem> {
    let id: String = row.get(0)?;
    let list_id: String = row.get(1)?;
    let name: String = row.get(2)?;
    let description: Option<String> = row.get(3)?;
    let state: String = row.get(4)?;
    let due_date: Option<String> = row.get(5)?;
    let completed_date: Option<String> = row.get(6)?;
    let created_date: String = row.get(7)?;
    let updated_date: Option<String> = row.get(8)?;

    Ok(TodoItem {
        id: parse_uuid(&id)?,
        list_id: parse_uuid(&list_id)?,
        name,
        description,
        state: parse_state(&state)?,
        due_date: parse_optional_datetime(due_date)?,
        completed_date: parse_optional_datetime(completed_date)?,
        created_date: parse_datetime(&created_date)?,
        updated_date: parse_optional_datetime(updated_date)?,
    })
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Always microsecond precision with a `Z` suffix so stored values sort
/// chronologically as text.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn format_optional_datetime(dt: &Option<DateTime<Utc>>) -> Option<String> {
    dt.as_ref().map(format_datetime)
}

/// `LIMIT`/`OFFSET` bind values for a page. A limit of -1 is unbounded.
pub fn page_bounds(page: &Page) -> (i64, i64) {
    let limit = page
        .batch_size
        .map(|n| i64::try_from(n).unwrap_or(i64::MAX))
        .unwrap_or(-1);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    (limit, offset)
}

fn conversion_error(e: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(conversion_error)
}

fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(conversion_error)
}

fn parse_optional_datetime(s: Option<String>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    s.as_deref().map(parse_datetime).transpose()
}

fn parse_state(s: &str) -> rusqlite::Result<ItemState> {
    s.parse::<ItemState>().map_err(conversion_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        let fractional = whole + chrono::Duration::microseconds(1500);

        assert_eq!(format_datetime(&whole), "2024-06-15T10:30:00.000000Z");
        assert_eq!(format_datetime(&fractional), "2024-06-15T10:30:00.001500Z");
        assert!(format_datetime(&whole) < format_datetime(&fractional));
    }

    #[test]
    fn test_parse_datetime_round_trip() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_datetime(&format_datetime(&dt)).unwrap(), dt);
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("not-a-datetime").is_err());
    }

    #[test]
    fn test_parse_optional_datetime_none() {
        assert_eq!(parse_optional_datetime(None).unwrap(), None);
    }

    #[test]
    fn test_parse_uuid_invalid() {
        assert!(parse_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_parse_state() {
        assert_eq!(parse_state("in-progress").unwrap(), ItemState::InProgress);
        assert!(parse_state("archived").is_err());
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(&Page::all()), (-1, 0));
        assert_eq!(page_bounds(&Page::new(20, 10)), (10, 20));
        assert_eq!(
            page_bounds(&Page {
                skip: Some(5),
                batch_size: None
            }),
            (-1, 5)
        );
    }
}
