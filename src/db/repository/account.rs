use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::{is_constraint_violation, parse_db_timestamp, parse_db_uuid, to_db_timestamp, DatabaseError};
use crate::models::*;

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, role, created_at, updated_at";

struct AccountRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: String,
    updated_at: String,
}

impl AccountRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            role: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

impl TryFrom<AccountRow> for Account {
    type Error = DatabaseError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: parse_db_uuid("accounts.id", &row.id)?,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role: Role::from_str(&row.role)?,
            created_at: parse_db_timestamp("accounts.created_at", &row.created_at)?,
            updated_at: parse_db_timestamp("accounts.updated_at", &row.updated_at)?,
        })
    }
}

fn email_taken(err: rusqlite::Error) -> DatabaseError {
    if is_constraint_violation(&err) {
        DatabaseError::ConstraintViolation("email already registered".into())
    } else {
        DatabaseError::from(err)
    }
}

pub fn insert_account(conn: &Connection, account: &Account) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO accounts (id, name, email, password_hash, role, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            account.id.to_string(),
            account.name,
            account.email,
            account.password_hash,
            account.role.as_str(),
            to_db_timestamp(&account.created_at),
            to_db_timestamp(&account.updated_at),
        ],
    )
    .map_err(email_taken)?;
    Ok(())
}

pub fn get_account(conn: &Connection, id: &Uuid) -> Result<Option<Account>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?1"),
            params![id.to_string()],
            AccountRow::from_row,
        )
        .optional()?;
    row.map(Account::try_from).transpose()
}

/// Case-insensitive email lookup (the column is `COLLATE NOCASE`).
pub fn find_account_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<Account>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ?1"),
            params![email],
            AccountRow::from_row,
        )
        .optional()?;
    row.map(Account::try_from).transpose()
}

pub fn update_account_identity(
    conn: &Connection,
    id: &Uuid,
    name: &str,
    email: &str,
    now: &DateTime<Utc>,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE accounts SET name = ?1, email = ?2, updated_at = ?3 WHERE id = ?4",
            params![name, email, to_db_timestamp(now), id.to_string()],
        )
        .map_err(email_taken)?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Account".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn update_password_hash(
    conn: &Connection,
    id: &Uuid,
    password_hash: &str,
    now: &DateTime<Utc>,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE accounts SET password_hash = ?1, updated_at = ?2 WHERE id = ?3",
        params![password_hash, to_db_timestamp(now), id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Account".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}
