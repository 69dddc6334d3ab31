//! Prescription issuance, bound to the doctor of an existing appointment.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Deserialize;
use uuid::Uuid;

use crate::appointment;
use crate::authorization::assert_owner;
use crate::db::repository;
use crate::error::{FieldErrors, ServiceError};
use crate::identity::Caller;
use crate::models::{Prescription, Role};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionRequest {
    pub appointment_id: Uuid,
    /// Optional echo of the appointment's patient; must match when present.
    #[serde(default)]
    pub patient_id: Option<Uuid>,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Signed so negative input reaches validation.
    #[serde(default)]
    pub refills_available: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Issue a prescription against `request.appointment_id`. Patient and doctor
/// are taken from the appointment.
pub fn issue(
    conn: &Connection,
    caller: &Caller,
    request: PrescriptionRequest,
    now: DateTime<Utc>,
) -> Result<Prescription, ServiceError> {
    caller.require_role(Role::Doctor)?;
    let appointment = appointment::get(conn, &request.appointment_id)?;
    assert_owner(&appointment, caller)?;

    let mut errors = FieldErrors::new();
    errors.require_text(&request.medication, "medication");
    errors.require_text(&request.dosage, "dosage");
    errors.require_text(&request.frequency, "frequency");
    errors.check(
        request.refills_available >= 0,
        "refillsAvailable must not be negative",
    );
    errors.check(
        request.refills_available <= i64::from(u32::MAX),
        "refillsAvailable is out of range",
    );
    errors.check(
        request.end_date.map_or(true, |end| end >= request.start_date),
        "endDate must not precede startDate",
    );
    errors.check(
        request
            .patient_id
            .map_or(true, |p| p == appointment.patient_id),
        "patientId does not match the appointment",
    );
    errors.finish()?;

    let refills_available = u32::try_from(request.refills_available).map_err(|_| {
        ServiceError::Validation(vec!["refillsAvailable is out of range".into()])
    })?;

    let prescription = Prescription {
        id: Uuid::new_v4(),
        appointment_id: Some(appointment.id),
        patient_id: appointment.patient_id,
        doctor_id: appointment.doctor_id,
        medication: request.medication.trim().to_string(),
        dosage: request.dosage.trim().to_string(),
        frequency: request.frequency.trim().to_string(),
        start_date: request.start_date,
        end_date: request.end_date,
        refills_available,
        notes: request.notes.filter(|n| !n.trim().is_empty()),
        created_at: now,
    };
    repository::insert_prescription(conn, &prescription)?;

    tracing::info!(
        prescription_id = %prescription.id,
        appointment_id = %appointment.id,
        "prescription issued"
    );
    Ok(prescription)
}

/// Prescriptions of one appointment in creation order. Either party of the
/// appointment may read them.
pub fn list_for_appointment(
    conn: &Connection,
    caller: &Caller,
    appointment_id: &Uuid,
) -> Result<Vec<Prescription>, ServiceError> {
    let appointment = appointment::get_for_caller(conn, appointment_id, caller)?;
    Ok(repository::list_prescriptions_for_appointment(
        conn,
        &appointment.id,
    )?)
}
