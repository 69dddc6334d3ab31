use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::{parse_db_uuid, to_db_timestamp, DatabaseError};

/// Appointment previously created under `(account_id, key)`, if any.
pub fn find_booking_key(
    conn: &Connection,
    account_id: &Uuid,
    key: &str,
) -> Result<Option<Uuid>, DatabaseError> {
    let id: Option<String> = conn
        .query_row(
            "SELECT appointment_id FROM booking_keys
             WHERE account_id = ?1 AND idempotency_key = ?2",
            params![account_id.to_string(), key],
            |row| row.get(0),
        )
        .optional()?;
    id.map(|id| parse_db_uuid("booking_keys.appointment_id", &id))
        .transpose()
}

pub fn insert_booking_key(
    conn: &Connection,
    account_id: &Uuid,
    key: &str,
    appointment_id: &Uuid,
    now: &DateTime<Utc>,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO booking_keys (account_id, idempotency_key, appointment_id, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            account_id.to_string(),
            key,
            appointment_id.to_string(),
            to_db_timestamp(now),
        ],
    )?;
    Ok(())
}
