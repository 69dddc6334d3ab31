use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;

use crate::crypto::PBKDF2_ITERATIONS;

/// Application-level constants
pub const APP_NAME: &str = "HealthSync";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
const DB_FILE_NAME: &str = "healthsync.db";

/// Minimum PBKDF2 work factor accepted from the environment.
const MIN_PBKDF2_ITERATIONS: u32 = 10_000;

/// Get the application data directory
/// ~/HealthSync/ on all platforms
pub fn app_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(APP_NAME))
        .ok_or(ConfigError::NoHomeDir)
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "healthsync_lib=info,tower_http=info".to_string()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot determine home directory; set HEALTHSYNC_DATA_DIR")]
    NoHomeDir,

    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub session_ttl_hours: i64,
    pub pbkdf2_iterations: u32,
}

impl Settings {
    /// Build from `HEALTHSYNC_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source. Unset or blank variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let data_dir = match get("HEALTHSYNC_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => app_data_dir()?,
        };
        let db_path = get("HEALTHSYNC_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DB_FILE_NAME));

        let bind_raw = get("HEALTHSYNC_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "HEALTHSYNC_BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let session_ttl_hours = match get("HEALTHSYNC_SESSION_TTL_HOURS") {
            None => DEFAULT_SESSION_TTL_HOURS,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(hours) if (1..=24 * 365).contains(&hours) => hours,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: "HEALTHSYNC_SESSION_TTL_HOURS",
                        value: raw,
                        reason: "must be between 1 and 8760".into(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "HEALTHSYNC_SESSION_TTL_HOURS",
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
        };

        let pbkdf2_iterations = match get("HEALTHSYNC_PBKDF2_ITERATIONS") {
            None => PBKDF2_ITERATIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n >= MIN_PBKDF2_ITERATIONS => n,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: "HEALTHSYNC_PBKDF2_ITERATIONS",
                        value: raw,
                        reason: format!("must be at least {MIN_PBKDF2_ITERATIONS}"),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "HEALTHSYNC_PBKDF2_ITERATIONS",
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            data_dir,
            db_path,
            bind_addr,
            session_ttl_hours,
            pbkdf2_iterations,
        })
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::hours(self.session_ttl_hours)
    }
}

#[cfg(test)]
impl Settings {
    /// Settings rooted at `dir` with a cheap work factor.
    pub(crate) fn for_tests(dir: &std::path::Path) -> Self {
        Self {
            data_dir: dir.to_path_buf(),
            db_path: dir.join(DB_FILE_NAME),
            bind_addr: ([127, 0, 0, 1], 0).into(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            pbkdf2_iterations: 1_000,
        }
    }
}
