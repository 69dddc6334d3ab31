//! Follow-up scheduling: a doctor books a new appointment for the patient of
//! one of their existing appointments.
//!
//! No double-booking check against the doctor's schedule.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::appointment::{self, AppointmentRequest};
use crate::error::ServiceError;
use crate::identity::Caller;
use crate::models::{Appointment, Role};

/// Schedule a follow-up to `origin_id`. The new appointment inherits the
/// origin's patient and starts SCHEDULED.
pub fn schedule_follow_up(
    conn: &Connection,
    caller: &Caller,
    origin_id: &Uuid,
    request: AppointmentRequest,
    now: DateTime<Utc>,
) -> Result<Appointment, ServiceError> {
    caller.require_role(Role::Doctor)?;
    let origin = appointment::get_for_caller(conn, origin_id, caller)?;
    let follow_up = appointment::create_as_doctor(conn, caller, origin.patient_id, request, now)?;
    tracing::info!(
        origin_id = %origin.id,
        appointment_id = %follow_up.id,
        "follow-up scheduled"
    );
    Ok(follow_up)
}
