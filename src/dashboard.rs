//! Role-scoped dashboard read-models.
//!
//! Both builders read every source table inside one transaction and partition
//! against a single `now`, so all views agree on the boundary instant:
//!
//! - patient: `upcoming` (date ≥ now), `recentVisits` (COMPLETED, date < now)
//! - doctor: `todaySchedule` over the half-open UTC day `[00:00, 24:00)`
//!
//! An appointment dated exactly `now` is upcoming, never a recent visit.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::db::repository;
use crate::error::ServiceError;
use crate::identity::Caller;
use crate::models::{AppointmentCard, AppointmentStatus, PatientSummary, PrescriptionCard, Role};

const RECENT_VISITS_LIMIT: usize = 5;
const RECENT_PATIENT_APPOINTMENTS: usize = 10;
const DOCTOR_UPCOMING_LIMIT: usize = 5;

// ─── Types ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDashboard {
    pub upcoming: Vec<AppointmentCard>,
    pub recent_visits: Vec<AppointmentCard>,
    pub active_prescriptions: Vec<PrescriptionCard>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorStats {
    pub total_patients_today: usize,
    pub pending_requests: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDashboard {
    pub today_schedule: Vec<AppointmentCard>,
    pub upcoming: Vec<AppointmentCard>,
    pub all_appointments: Vec<AppointmentCard>,
    pub recent_patients: Vec<PatientSummary>,
    pub stats: DoctorStats,
}

/// Dashboard for whichever role the caller holds.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role")]
pub enum Dashboard {
    #[serde(rename = "PATIENT")]
    Patient(PatientDashboard),
    #[serde(rename = "DOCTOR")]
    Doctor(DoctorDashboard),
}

// ─── Partitioning ─────────────────────────────────────────────────────────────

/// Midnight UTC of the day containing `now`.
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Split ascending cards into `(upcoming, recent_visits)`.
pub fn partition_patient(
    cards: Vec<AppointmentCard>,
    now: DateTime<Utc>,
) -> (Vec<AppointmentCard>, Vec<AppointmentCard>) {
    let (upcoming, past): (Vec<_>, Vec<_>) = cards
        .into_iter()
        .partition(|c| c.appointment.appointment_date >= now);

    let recent_visits = past
        .into_iter()
        .rev()
        .filter(|c| c.appointment.status == AppointmentStatus::Completed)
        .take(RECENT_VISITS_LIMIT)
        .collect();

    (upcoming, recent_visits)
}

/// Cards dated within the UTC day of `now`, keeping input order.
pub fn todays_schedule(cards: &[AppointmentCard], now: DateTime<Utc>) -> Vec<AppointmentCard> {
    let start = start_of_day(now);
    let end = start + Duration::days(1);
    cards
        .iter()
        .filter(|c| {
            let date = c.appointment.appointment_date;
            date >= start && date < end
        })
        .cloned()
        .collect()
}

/// Distinct patient ids from the most recent COMPLETED appointments, newest first.
pub fn recent_patient_ids(cards: &[AppointmentCard]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    cards
        .iter()
        .rev()
        .filter(|c| c.appointment.status == AppointmentStatus::Completed)
        .take(RECENT_PATIENT_APPOINTMENTS)
        .map(|c| c.appointment.patient_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

// ─── Builders ─────────────────────────────────────────────────────────────────

pub fn build_patient_dashboard(
    conn: &Connection,
    patient_id: &Uuid,
    now: DateTime<Utc>,
) -> Result<PatientDashboard, ServiceError> {
    let tx = conn.unchecked_transaction()?;
    let cards = repository::list_appointment_cards(&tx, Role::Patient, patient_id)?;
    let prescriptions = repository::list_prescription_cards_for_patient(&tx, patient_id)?;
    tx.commit()?;

    let (upcoming, recent_visits) = partition_patient(cards, now);
    let active_prescriptions = prescriptions
        .into_iter()
        .filter(|rx| rx.prescription.is_active_at(&now))
        .collect();

    Ok(PatientDashboard {
        upcoming,
        recent_visits,
        active_prescriptions,
    })
}

pub fn build_doctor_dashboard(
    conn: &Connection,
    doctor_id: &Uuid,
    now: DateTime<Utc>,
) -> Result<DoctorDashboard, ServiceError> {
    let tx = conn.unchecked_transaction()?;
    let all_appointments = repository::list_appointment_cards(&tx, Role::Doctor, doctor_id)?;

    let mut recent_patients = Vec::new();
    for id in recent_patient_ids(&all_appointments) {
        if let Some(summary) = repository::get_patient_summary(&tx, &id)? {
            recent_patients.push(summary);
        }
    }
    tx.commit()?;

    let today_schedule = todays_schedule(&all_appointments, now);
    let upcoming = all_appointments
        .iter()
        .filter(|c| c.appointment.appointment_date >= now)
        .take(DOCTOR_UPCOMING_LIMIT)
        .cloned()
        .collect();
    let stats = DoctorStats {
        total_patients_today: today_schedule.len(),
        pending_requests: all_appointments
            .iter()
            .filter(|c| c.appointment.status == AppointmentStatus::Pending)
            .count(),
    };

    Ok(DoctorDashboard {
        today_schedule,
        upcoming,
        all_appointments,
        recent_patients,
        stats,
    })
}

/// Build the caller's dashboard.
pub fn build_for_caller(
    conn: &Connection,
    caller: &Caller,
    now: DateTime<Utc>,
) -> Result<Dashboard, ServiceError> {
    match caller.role {
        Role::Patient => {
            build_patient_dashboard(conn, &caller.profile_id, now).map(Dashboard::Patient)
        }
        Role::Doctor => build_doctor_dashboard(conn, &caller.profile_id, now).map(Dashboard::Doctor),
    }
}
