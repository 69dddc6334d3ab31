pub mod repository;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use repository::*;
pub use sqlite::*;

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Invalid timestamp in {field}: {value}")]
    InvalidTimestamp { field: String, value: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
}

/// Render a timestamp in the fixed-width storage format
/// (`2026-10-18T09:30:00.000000000Z`). Lexical order matches chronological order
/// and no precision is lost, so a stored value reads back equal.
pub fn to_db_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a stored timestamp back into UTC.
pub fn parse_db_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DatabaseError::InvalidTimestamp {
            field: field.into(),
            value: value.into(),
        })
}

/// Parse a stored UUID column.
pub fn parse_db_uuid(field: &str, value: &str) -> Result<uuid::Uuid, DatabaseError> {
    uuid::Uuid::parse_str(value).map_err(|_| DatabaseError::InvalidEnum {
        field: field.into(),
        value: value.into(),
    })
}

/// True when a rusqlite error is a UNIQUE / CHECK / FK constraint failure.
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_are_fixed_width_and_sortable() {
        let a = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let b = a + chrono::Duration::milliseconds(1500);
        let sa = to_db_timestamp(&a);
        let sb = to_db_timestamp(&b);
        assert_eq!(sa, "2026-03-01T09:00:00.000000000Z");
        assert_eq!(sa.len(), sb.len());
        assert!(sa < sb);
    }

    #[test]
    fn sub_millisecond_instants_survive_storage() {
        let a = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(124_245_678);
        let b = a + chrono::Duration::nanoseconds(1);
        let (sa, sb) = (to_db_timestamp(&a), to_db_timestamp(&b));
        assert_eq!(sa, "2026-03-01T09:00:00.124245678Z");
        assert!(sa < sb);
        assert_eq!(parse_db_timestamp("created_at", &sa).unwrap(), a);
    }

    #[test]
    fn timestamp_parse_inverts_render() {
        let a = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap();
        let parsed = parse_db_timestamp("appointment_date", &to_db_timestamp(&a)).unwrap();
        assert_eq!(parsed, a);
    }

    #[test]
    fn bad_timestamp_names_the_field() {
        let err = parse_db_timestamp("end_date", "yesterday").unwrap_err();
        assert!(err.to_string().contains("end_date"));
    }
}
