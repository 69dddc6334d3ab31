//! Appointment endpoints.
//!
//! - `GET /api/appointments` — caller's appointments, optional `startDate`/`endDate`
//! - `POST /api/appointments` — patient booking, honours `Idempotency-Key`
//! - `POST /api/appointments/doctor` — doctor-created appointment
//! - `GET|PATCH|DELETE /api/appointments/:id` — owner-gated
//! - `POST /api/appointments/:id/follow-up` — doctor follow-up

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::types::{ApiContext, CallerContext};
use crate::appointment::{self, AppointmentRequest};
use crate::follow_up;
use crate::models::{Appointment, AppointmentStatus, DateRange};

pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

/// `GET /api/appointments`
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
    ApiQuery(range): ApiQuery<DateRange>,
) -> Result<Json<AppointmentsResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let appointments = appointment::list(&conn, &auth.caller, &range)?;
    Ok(Json(AppointmentsResponse { appointments }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientBooking {
    pub doctor_id: Uuid,
    #[serde(flatten)]
    pub details: AppointmentRequest,
}

/// `POST /api/appointments` — 201 on a new booking, 200 when an
/// idempotency key replays an earlier one.
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
    headers: HeaderMap,
    ApiJson(booking): ApiJson<PatientBooking>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let key = headers
        .get(IDEMPOTENCY_HEADER)
        .map(|v| {
            v.to_str()
                .map_err(|_| ApiError::BadRequest("Invalid Idempotency-Key header".into()))
        })
        .transpose()?;

    let conn = ctx.core.open_db()?;
    let result = appointment::create_as_patient(
        &conn,
        &auth.caller,
        booking.doctor_id,
        booking.details,
        key,
        Utc::now(),
    )?;

    let status = if result.replayed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(result.appointment)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorBooking {
    pub patient_id: Uuid,
    #[serde(flatten)]
    pub details: AppointmentRequest,
}

/// `POST /api/appointments/doctor`
pub async fn create_as_doctor(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
    ApiJson(booking): ApiJson<DoctorBooking>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let conn = ctx.core.open_db()?;
    let appt = appointment::create_as_doctor(
        &conn,
        &auth.caller,
        booking.patient_id,
        booking.details,
        Utc::now(),
    )?;
    Ok((StatusCode::CREATED, Json(appt)))
}

/// `GET /api/appointments/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.core.open_db()?;
    Ok(Json(appointment::get_for_caller(&conn, &id, &auth.caller)?))
}

#[derive(Deserialize)]
pub struct StatusPatch {
    pub status: AppointmentStatus,
}

/// `PATCH /api/appointments/:id` — status transition.
pub async fn update_status(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<StatusPatch>,
) -> Result<Json<Appointment>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.core.open_db()?;
    Ok(Json(appointment::transition(
        &conn,
        &id,
        patch.status,
        &auth.caller,
    )?))
}

/// `DELETE /api/appointments/:id`
pub async fn delete(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.core.open_db()?;
    appointment::delete(&conn, &id, &auth.caller)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/appointments/:id/follow-up`
pub async fn follow_up(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<AppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let origin_id = parse_id(&id)?;
    let conn = ctx.core.open_db()?;
    let appt = follow_up::schedule_follow_up(&conn, &auth.caller, &origin_id, request, Utc::now())?;
    Ok((StatusCode::CREATED, Json(appt)))
}
