//! Doctor directory endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::account;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::DoctorListing;

#[derive(Serialize)]
pub struct DoctorsResponse {
    pub doctors: Vec<DoctorListing>,
}

/// `GET /api/doctors` — doctors available for booking.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<DoctorsResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let doctors = account::list_doctors(&conn)?;
    Ok(Json(DoctorsResponse { doctors }))
}
