//! Application state shared by every HTTP handler.
//!
//! Holds settings and the database location only. Each request opens its own
//! connection; nothing mutable is kept in-process between requests.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Settings;
use crate::db;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),

    #[error("Cannot create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub struct CoreState {
    pub settings: Settings,
}

impl CoreState {
    /// Prepare the data directory and bring the schema up to date.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        if let Some(parent) = settings.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| CoreError::DataDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = db::open_database(&settings.db_path)?;
        let version = db::get_current_version(&conn);
        tracing::info!(schema_version = version, "database ready");

        Ok(Self { settings })
    }

    /// Open a per-request connection. Migrations already ran in [`CoreState::new`].
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        Ok(db::open_connection(&self.settings.db_path)?)
    }
}
