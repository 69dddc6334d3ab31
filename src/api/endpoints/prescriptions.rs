//! Prescription endpoints.
//!
//! - `POST /api/prescriptions` — issue (bound doctor only)
//! - `GET /api/appointments/:id/prescriptions` — list for one appointment

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde::Serialize;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ApiContext, CallerContext};
use crate::models::Prescription;
use crate::prescription::{self, PrescriptionRequest};

/// `POST /api/prescriptions`
pub async fn issue(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
    ApiJson(request): ApiJson<PrescriptionRequest>,
) -> Result<(StatusCode, Json<Prescription>), ApiError> {
    let conn = ctx.core.open_db()?;
    let rx = prescription::issue(&conn, &auth.caller, request, Utc::now())?;
    Ok((StatusCode::CREATED, Json(rx)))
}

#[derive(Serialize)]
pub struct PrescriptionsResponse {
    pub prescriptions: Vec<Prescription>,
}

/// `GET /api/appointments/:id/prescriptions`
pub async fn list_for_appointment(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
    Path(appointment_id): Path<String>,
) -> Result<Json<PrescriptionsResponse>, ApiError> {
    let appointment_id = parse_id(&appointment_id)?;
    let conn = ctx.core.open_db()?;
    let prescriptions = prescription::list_for_appointment(&conn, &auth.caller, &appointment_id)?;
    Ok(Json(PrescriptionsResponse { prescriptions }))
}
