//! API endpoint handlers, one module per resource.

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod doctors;
pub mod health;
pub mod prescriptions;
pub mod users;

use uuid::Uuid;

use crate::api::error::ApiError;

/// Parse a path id, rejecting malformed values with 400.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid ID format".into()))
}
