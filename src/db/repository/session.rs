use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::{parse_db_timestamp, parse_db_uuid, to_db_timestamp, DatabaseError};
use crate::models::Role;

/// A stored bearer session joined with the account's role.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub account_id: Uuid,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

pub fn insert_session(
    conn: &Connection,
    token_hash: &[u8; 32],
    account_id: &Uuid,
    created_at: &DateTime<Utc>,
    expires_at: &DateTime<Utc>,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO sessions (token_hash, account_id, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            &token_hash[..],
            account_id.to_string(),
            to_db_timestamp(created_at),
            to_db_timestamp(expires_at),
        ],
    )?;
    Ok(())
}

pub fn find_session(
    conn: &Connection,
    token_hash: &[u8; 32],
) -> Result<Option<SessionRecord>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT s.account_id, u.role, s.expires_at
             FROM sessions s
             JOIN accounts u ON u.id = s.account_id
             WHERE s.token_hash = ?1",
            params![&token_hash[..]],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    row.map(|(account_id, role, expires_at)| {
        Ok(SessionRecord {
            account_id: parse_db_uuid("sessions.account_id", &account_id)?,
            role: Role::from_str(&role)?,
            expires_at: parse_db_timestamp("sessions.expires_at", &expires_at)?,
        })
    })
    .transpose()
}

/// Returns whether a session was removed.
pub fn delete_session(conn: &Connection, token_hash: &[u8; 32]) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM sessions WHERE token_hash = ?1",
        params![&token_hash[..]],
    )?;
    Ok(changed > 0)
}

/// Revoke every session of an account except `keep`.
pub fn delete_other_sessions(
    conn: &Connection,
    account_id: &Uuid,
    keep: Option<&[u8; 32]>,
) -> Result<usize, DatabaseError> {
    let removed = conn.execute(
        "DELETE FROM sessions WHERE account_id = ?1 AND (?2 IS NULL OR token_hash <> ?2)",
        params![account_id.to_string(), keep.map(|h| h.to_vec())],
    )?;
    Ok(removed)
}

pub fn prune_expired_sessions(conn: &Connection, now: &DateTime<Utc>) -> Result<usize, DatabaseError> {
    let removed = conn.execute(
        "DELETE FROM sessions WHERE expires_at <= ?1",
        params![to_db_timestamp(now)],
    )?;
    Ok(removed)
}
