//! Seeding helpers shared by unit tests.

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::*;
use crate::identity::Caller;
use crate::models::*;

/// Fixed reference instant used across tests: 2026-03-10 12:00:00 UTC.
pub fn ref_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

fn seed_account(conn: &Connection, name: &str, role: Role) -> Uuid {
    let account = Account {
        id: Uuid::new_v4(),
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        password_hash: "not-a-real-hash".into(),
        role,
        created_at: ref_now(),
        updated_at: ref_now(),
    };
    insert_account(conn, &account).unwrap();
    account.id
}

/// Seed a patient account + profile. Returns the caller for that patient.
pub fn seed_patient(conn: &Connection, name: &str) -> Caller {
    let account_id = seed_account(conn, name, Role::Patient);
    let profile = PatientProfile::empty(account_id);
    insert_patient_profile(conn, &profile).unwrap();
    Caller {
        account_id,
        role: Role::Patient,
        profile_id: profile.id,
    }
}

/// Seed a doctor account + profile with a specialty.
pub fn seed_doctor(conn: &Connection, name: &str, specialty: &str) -> Caller {
    let account_id = seed_account(conn, name, Role::Doctor);
    let mut profile = DoctorProfile::empty(account_id);
    profile.specialty = Some(specialty.into());
    insert_doctor_profile(conn, &profile).unwrap();
    Caller {
        account_id,
        role: Role::Doctor,
        profile_id: profile.id,
    }
}

/// Insert an appointment row directly, bypassing the lifecycle manager.
pub fn seed_appointment(
    conn: &Connection,
    patient: &Caller,
    doctor: &Caller,
    date: DateTime<Utc>,
    status: AppointmentStatus,
) -> Appointment {
    let appt = Appointment {
        id: Uuid::new_v4(),
        patient_id: patient.profile_id,
        doctor_id: doctor.profile_id,
        appointment_date: date,
        duration_minutes: 30,
        reason_for_visit: "Checkup".into(),
        status,
        notes: None,
        created_at: ref_now(),
    };
    insert_appointment(conn, &appt).unwrap();
    appt
}
