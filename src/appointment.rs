//! Appointment lifecycle — creation, guarded reads, status transitions, deletion.
//!
//! Status changes go through the transition table on `AppointmentStatus` and
//! are written with a compare-and-set on the stored status, so two racing
//! transitions on the same row cannot both land.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use serde::Deserialize;
use uuid::Uuid;

use crate::authorization::assert_owner;
use crate::db::repository;
use crate::error::{FieldErrors, ServiceError};
use crate::identity::Caller;
use crate::models::{Appointment, AppointmentStatus, DateRange, Role};

// ─── Types ────────────────────────────────────────────────────────────────────

/// Scheduling details shared by patient bookings, doctor-created appointments
/// and follow-ups. The counterpart profile id is passed separately.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub appointment_date: DateTime<Utc>,
    /// Minutes. Signed so non-positive input reaches validation.
    pub duration: i64,
    pub reason_for_visit: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Outcome of a patient booking.
#[derive(Debug, Clone)]
pub struct Booking {
    pub appointment: Appointment,
    /// True when the idempotency key matched an earlier booking.
    pub replayed: bool,
}

// ─── Validation ───────────────────────────────────────────────────────────────

fn validate(request: &AppointmentRequest) -> Result<u32, ServiceError> {
    let mut errors = FieldErrors::new();
    errors.check(request.duration > 0, "duration must be greater than 0");
    errors.check(
        request.duration <= i64::from(u32::MAX),
        "duration is out of range",
    );
    errors.require_text(&request.reason_for_visit, "reasonForVisit");
    errors.finish()?;
    u32::try_from(request.duration)
        .map_err(|_| ServiceError::Validation(vec!["duration is out of range".into()]))
}

/// A retried request must describe the booking its key first created.
fn same_booking(
    existing: &Appointment,
    doctor_id: &Uuid,
    request: &AppointmentRequest,
    duration_minutes: u32,
) -> bool {
    existing.doctor_id == *doctor_id
        && existing.appointment_date == request.appointment_date
        && existing.duration_minutes == duration_minutes
        && existing.reason_for_visit == request.reason_for_visit.trim()
}

fn build(
    patient_id: Uuid,
    doctor_id: Uuid,
    request: AppointmentRequest,
    duration_minutes: u32,
    status: AppointmentStatus,
    now: DateTime<Utc>,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        patient_id,
        doctor_id,
        appointment_date: request.appointment_date,
        duration_minutes,
        reason_for_visit: request.reason_for_visit.trim().to_string(),
        status,
        notes: request.notes.filter(|n| !n.trim().is_empty()),
        created_at: now,
    }
}

// ─── Creation ─────────────────────────────────────────────────────────────────

/// Patient books `doctor_id`. New appointments start PENDING.
///
/// With an idempotency key, the first booking records `(account, key)` in the
/// same transaction as the insert; a repeat returns that appointment.
pub fn create_as_patient(
    conn: &Connection,
    caller: &Caller,
    doctor_id: Uuid,
    request: AppointmentRequest,
    idempotency_key: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Booking, ServiceError> {
    caller.require_role(Role::Patient)?;
    let duration_minutes = validate(&request)?;
    let key = idempotency_key.map(str::trim).filter(|k| !k.is_empty());

    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    if let Some(key) = key {
        if let Some(existing_id) = repository::find_booking_key(&tx, &caller.account_id, key)? {
            if let Some(existing) = repository::get_appointment(&tx, &existing_id)? {
                if !same_booking(&existing, &doctor_id, &request, duration_minutes) {
                    tracing::warn!(
                        appointment_id = %existing.id,
                        "idempotency key reused with a different booking"
                    );
                    return Err(ServiceError::Conflict(
                        "idempotency key already used for a different booking".into(),
                    ));
                }
                tracing::info!(appointment_id = %existing.id, "booking replayed from idempotency key");
                return Ok(Booking {
                    appointment: existing,
                    replayed: true,
                });
            }
        }
    }

    if repository::get_doctor_profile(&tx, &doctor_id)?.is_none() {
        return Err(ServiceError::not_found("DoctorProfile", doctor_id));
    }

    let appointment = build(
        caller.profile_id,
        doctor_id,
        request,
        duration_minutes,
        AppointmentStatus::Pending,
        now,
    );
    repository::insert_appointment(&tx, &appointment)?;
    if let Some(key) = key {
        repository::insert_booking_key(&tx, &caller.account_id, key, &appointment.id, &now)?;
    }
    tx.commit()?;

    tracing::info!(
        appointment_id = %appointment.id,
        status = %appointment.status,
        "appointment booked by patient"
    );
    Ok(Booking {
        appointment,
        replayed: false,
    })
}

/// Doctor schedules an appointment for `patient_id`. Starts SCHEDULED.
pub fn create_as_doctor(
    conn: &Connection,
    caller: &Caller,
    patient_id: Uuid,
    request: AppointmentRequest,
    now: DateTime<Utc>,
) -> Result<Appointment, ServiceError> {
    caller.require_role(Role::Doctor)?;
    let duration_minutes = validate(&request)?;

    if repository::get_patient_profile(conn, &patient_id)?.is_none() {
        return Err(ServiceError::not_found("PatientProfile", patient_id));
    }

    let appointment = build(
        patient_id,
        caller.profile_id,
        request,
        duration_minutes,
        AppointmentStatus::Scheduled,
        now,
    );
    repository::insert_appointment(conn, &appointment)?;

    tracing::info!(
        appointment_id = %appointment.id,
        status = %appointment.status,
        "appointment scheduled by doctor"
    );
    Ok(appointment)
}

// ─── Reads ────────────────────────────────────────────────────────────────────

/// Unguarded lookup. Callers acting for a user go through [`get_for_caller`].
pub fn get(conn: &Connection, id: &Uuid) -> Result<Appointment, ServiceError> {
    repository::get_appointment(conn, id)?.ok_or_else(|| ServiceError::not_found("Appointment", id))
}

pub fn get_for_caller(
    conn: &Connection,
    id: &Uuid,
    caller: &Caller,
) -> Result<Appointment, ServiceError> {
    let appointment = get(conn, id)?;
    assert_owner(&appointment, caller)?;
    Ok(appointment)
}

/// Appointments owned by the caller, ascending by date, optionally bounded.
pub fn list(
    conn: &Connection,
    caller: &Caller,
    range: &DateRange,
) -> Result<Vec<Appointment>, ServiceError> {
    Ok(repository::list_appointments_for_owner(
        conn,
        caller.role,
        &caller.profile_id,
        range,
    )?)
}

// ─── Transitions ──────────────────────────────────────────────────────────────

/// Move appointment `id` to `requested` on behalf of `caller`.
pub fn transition(
    conn: &Connection,
    id: &Uuid,
    requested: AppointmentStatus,
    caller: &Caller,
) -> Result<Appointment, ServiceError> {
    let current = get_for_caller(conn, id, caller)?;
    apply_transition(conn, &current, requested)
}

/// Validate the edge from `current.status` and write it only if the stored
/// status still equals `current.status`.
pub fn apply_transition(
    conn: &Connection,
    current: &Appointment,
    requested: AppointmentStatus,
) -> Result<Appointment, ServiceError> {
    if !current.status.can_transition_to(requested) {
        tracing::warn!(
            appointment_id = %current.id,
            from = %current.status,
            to = %requested,
            "rejected status transition"
        );
        return Err(ServiceError::InvalidTransition {
            from: current.status,
            to: requested,
        });
    }

    let written =
        repository::update_appointment_status_if(conn, &current.id, current.status, requested)?;
    if !written {
        if repository::get_appointment(conn, &current.id)?.is_none() {
            return Err(ServiceError::not_found("Appointment", current.id));
        }
        tracing::warn!(
            appointment_id = %current.id,
            from = %current.status,
            to = %requested,
            "status changed concurrently"
        );
        return Err(ServiceError::Conflict(
            "appointment status changed concurrently".into(),
        ));
    }

    tracing::info!(
        appointment_id = %current.id,
        from = %current.status,
        to = %requested,
        "appointment status updated"
    );
    Ok(Appointment {
        status: requested,
        ..current.clone()
    })
}

// ─── Deletion ─────────────────────────────────────────────────────────────────

pub fn delete(conn: &Connection, id: &Uuid, caller: &Caller) -> Result<(), ServiceError> {
    let appointment = get_for_caller(conn, id, caller)?;
    repository::delete_appointment(conn, &appointment.id)?;
    tracing::info!(appointment_id = %appointment.id, "appointment deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    use chrono::Duration;

    use crate::db::test_fixtures::*;
    use crate::db::{open_connection, open_database, open_memory_database};

    fn request(date: DateTime<Utc>) -> AppointmentRequest {
        AppointmentRequest {
            appointment_date: date,
            duration: 30,
            reason_for_visit: "Checkup".into(),
            notes: None,
        }
    }

    #[test]
    fn patient_booking_round_trips_as_pending() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let date = ref_now() + Duration::days(7);

        let booking =
            create_as_patient(&conn, &ana, dre.profile_id, request(date), None, ref_now()).unwrap();
        assert!(!booking.replayed);
        assert_eq!(booking.appointment.status, AppointmentStatus::Pending);

        let fetched = get(&conn, &booking.appointment.id).unwrap();
        assert_eq!(fetched, booking.appointment);
        assert_eq!(fetched.patient_id, ana.profile_id);
        assert_eq!(fetched.doctor_id, dre.profile_id);
        assert_eq!(fetched.duration_minutes, 30);
        assert_eq!(fetched.reason_for_visit, "Checkup");
    }

    #[test]
    fn sub_millisecond_instants_read_back_unchanged() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let date = ref_now() + Duration::days(7) + Duration::microseconds(124_245);
        let now = ref_now() + Duration::nanoseconds(123_456_789);

        let booking =
            create_as_patient(&conn, &ana, dre.profile_id, request(date), None, now).unwrap();
        let fetched = get(&conn, &booking.appointment.id).unwrap();

        assert_eq!(fetched, booking.appointment);
        assert_eq!(fetched.appointment_date, date);
        assert_eq!(fetched.created_at, now);
    }

    #[test]
    fn booking_validates_every_field_before_writing() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let bad = AppointmentRequest {
            appointment_date: ref_now(),
            duration: 0,
            reason_for_visit: "   ".into(),
            notes: None,
        };

        match create_as_patient(&conn, &ana, dre.profile_id, bad, None, ref_now()) {
            Err(ServiceError::Validation(fields)) => assert_eq!(fields.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(list(&conn, &ana, &DateRange::default()).unwrap().is_empty());
    }

    #[test]
    fn negative_duration_rejected() {
        let conn = open_memory_database().unwrap();
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let ana = seed_patient(&conn, "Ana");
        let mut req = request(ref_now());
        req.duration = -15;
        assert!(matches!(
            create_as_doctor(&conn, &dre, ana.profile_id, req, ref_now()),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn booking_unknown_doctor_not_found() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        assert!(matches!(
            create_as_patient(&conn, &ana, Uuid::new_v4(), request(ref_now()), None, ref_now()),
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[test]
    fn doctor_cannot_book_as_patient() {
        let conn = open_memory_database().unwrap();
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let other = seed_doctor(&conn, "Dr Okafor", "Dermatology");
        assert!(matches!(
            create_as_patient(&conn, &dre, other.profile_id, request(ref_now()), None, ref_now()),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn idempotency_key_replays_original_booking() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let date = ref_now() + Duration::days(2);

        let first =
            create_as_patient(&conn, &ana, dre.profile_id, request(date), Some("k-1"), ref_now())
                .unwrap();
        let retry =
            create_as_patient(&conn, &ana, dre.profile_id, request(date), Some("k-1"), ref_now())
                .unwrap();

        assert!(retry.replayed);
        assert_eq!(retry.appointment.id, first.appointment.id);
        assert_eq!(list(&conn, &ana, &DateRange::default()).unwrap().len(), 1);

        let other =
            create_as_patient(&conn, &ana, dre.profile_id, request(date), Some("k-2"), ref_now())
                .unwrap();
        assert_ne!(other.appointment.id, first.appointment.id);
    }

    #[test]
    fn reused_key_with_different_booking_conflicts() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let okafor = seed_doctor(&conn, "Dr Okafor", "Dermatology");
        let date = ref_now() + Duration::days(2);

        create_as_patient(&conn, &ana, dre.profile_id, request(date), Some("k-1"), ref_now())
            .unwrap();

        let other_doctor =
            create_as_patient(&conn, &ana, okafor.profile_id, request(date), Some("k-1"), ref_now());
        assert!(matches!(other_doctor, Err(ServiceError::Conflict(_))));

        let other_date = create_as_patient(
            &conn,
            &ana,
            dre.profile_id,
            request(date + Duration::hours(1)),
            Some("k-1"),
            ref_now(),
        );
        assert!(matches!(other_date, Err(ServiceError::Conflict(_))));
        assert_eq!(list(&conn, &ana, &DateRange::default()).unwrap().len(), 1);
    }

    #[test]
    fn idempotency_keys_are_per_account() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let ben = seed_patient(&conn, "Ben");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");

        let a = create_as_patient(&conn, &ana, dre.profile_id, request(ref_now()), Some("same"), ref_now())
            .unwrap();
        let b = create_as_patient(&conn, &ben, dre.profile_id, request(ref_now()), Some("same"), ref_now())
            .unwrap();
        assert!(!b.replayed);
        assert_ne!(a.appointment.id, b.appointment.id);
    }

    #[test]
    fn doctor_created_appointment_starts_scheduled() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let mut req = request(ref_now() + Duration::days(1));
        req.notes = Some("Bring lab work".into());

        let appt = create_as_doctor(&conn, &dre, ana.profile_id, req, ref_now()).unwrap();
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert_eq!(appt.notes.as_deref(), Some("Bring lab work"));
        assert_eq!(appt.doctor_id, dre.profile_id);
    }

    #[test]
    fn doctor_create_requires_existing_patient() {
        let conn = open_memory_database().unwrap();
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        assert!(matches!(
            create_as_doctor(&conn, &dre, Uuid::new_v4(), request(ref_now()), ref_now()),
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[test]
    fn completed_appointment_cannot_be_rescheduled() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let appt = seed_appointment(&conn, &ana, &dre, ref_now(), AppointmentStatus::Scheduled);

        let done = transition(&conn, &appt.id, AppointmentStatus::Completed, &dre).unwrap();
        assert_eq!(done.status, AppointmentStatus::Completed);
        assert_eq!(get(&conn, &appt.id).unwrap().status, AppointmentStatus::Completed);

        match transition(&conn, &appt.id, AppointmentStatus::Scheduled, &dre) {
            Err(ServiceError::InvalidTransition { from, to }) => {
                assert_eq!(from, AppointmentStatus::Completed);
                assert_eq!(to, AppointmentStatus::Scheduled);
            }
            other => panic!("expected invalid transition, got {other:?}"),
        }
        assert_eq!(get(&conn, &appt.id).unwrap().status, AppointmentStatus::Completed);
    }

    #[test]
    fn self_loop_rejected() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let appt = seed_appointment(&conn, &ana, &dre, ref_now(), AppointmentStatus::Pending);
        assert!(matches!(
            transition(&conn, &appt.id, AppointmentStatus::Pending, &ana),
            Err(ServiceError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn patient_can_cancel_own_pending_booking() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let appt = seed_appointment(&conn, &ana, &dre, ref_now(), AppointmentStatus::Pending);
        let canceled = transition(&conn, &appt.id, AppointmentStatus::Canceled, &ana).unwrap();
        assert_eq!(canceled.status, AppointmentStatus::Canceled);
    }

    #[test]
    fn non_owner_cannot_transition_or_read() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let ben = seed_patient(&conn, "Ben");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let dro = seed_doctor(&conn, "Dr Okafor", "Dermatology");
        let appt = seed_appointment(&conn, &ana, &dre, ref_now(), AppointmentStatus::Pending);

        assert!(matches!(
            transition(&conn, &appt.id, AppointmentStatus::Scheduled, &dro),
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            get_for_caller(&conn, &appt.id, &ben),
            Err(ServiceError::Forbidden(_))
        ));
        assert_eq!(get(&conn, &appt.id).unwrap().status, AppointmentStatus::Pending);
    }

    #[test]
    fn stale_read_conflicts() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let appt = seed_appointment(&conn, &ana, &dre, ref_now(), AppointmentStatus::Scheduled);

        apply_transition(&conn, &appt, AppointmentStatus::Completed).unwrap();
        assert!(matches!(
            apply_transition(&conn, &appt, AppointmentStatus::Canceled),
            Err(ServiceError::Conflict(_))
        ));
        assert_eq!(get(&conn, &appt.id).unwrap().status, AppointmentStatus::Completed);
    }

    #[test]
    fn transition_of_deleted_row_not_found() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let appt = seed_appointment(&conn, &ana, &dre, ref_now(), AppointmentStatus::Scheduled);
        delete(&conn, &appt.id, &dre).unwrap();

        assert!(matches!(
            apply_transition(&conn, &appt, AppointmentStatus::Completed),
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[test]
    fn racing_transitions_exactly_one_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.db");

        let setup = open_database(&path).unwrap();
        let ana = seed_patient(&setup, "Ana");
        let dre = seed_doctor(&setup, "Dr Reyes", "Cardiology");
        let appt = seed_appointment(&setup, &ana, &dre, ref_now(), AppointmentStatus::Scheduled);
        drop(setup);

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = [AppointmentStatus::Completed, AppointmentStatus::Canceled]
            .into_iter()
            .map(|target| {
                let barrier = Arc::clone(&barrier);
                let path = path.clone();
                let id = appt.id;
                thread::spawn(move || {
                    let conn = open_connection(&path).unwrap();
                    let current = get(&conn, &id).unwrap();
                    barrier.wait();
                    apply_transition(&conn, &current, target)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(ServiceError::Conflict(_))))
            .count();
        assert_eq!(wins, 1);
        assert_eq!(conflicts, 1);

        let conn = open_connection(&path).unwrap();
        let winner = results.into_iter().find_map(Result::ok).unwrap();
        assert_eq!(get(&conn, &appt.id).unwrap().status, winner.status);
    }

    #[test]
    fn list_is_scoped_ordered_and_bounded() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let ben = seed_patient(&conn, "Ben");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let now = ref_now();

        let later = seed_appointment(&conn, &ana, &dre, now + Duration::days(3), AppointmentStatus::Pending);
        let sooner = seed_appointment(&conn, &ana, &dre, now + Duration::days(1), AppointmentStatus::Pending);
        let bens = seed_appointment(&conn, &ben, &dre, now + Duration::days(2), AppointmentStatus::Pending);

        let mine = list(&conn, &ana, &DateRange::default()).unwrap();
        assert_eq!(
            mine.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![sooner.id, later.id]
        );
        assert!(mine.iter().all(|a| a.patient_id == ana.profile_id));

        let doctor_view = list(&conn, &dre, &DateRange::default()).unwrap();
        assert_eq!(doctor_view.len(), 3);
        assert_eq!(doctor_view[1].id, bens.id);

        // Inclusive bounds.
        let bounded = list(
            &conn,
            &dre,
            &DateRange::between(now + Duration::days(1), now + Duration::days(2)),
        )
        .unwrap();
        assert_eq!(
            bounded.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![sooner.id, bens.id]
        );

        let open_start = DateRange {
            start_date: Some(now + Duration::days(2)),
            end_date: None,
        };
        assert_eq!(list(&conn, &ana, &open_start).unwrap().len(), 1);
    }

    #[test]
    fn delete_is_owner_gated() {
        let conn = open_memory_database().unwrap();
        let ana = seed_patient(&conn, "Ana");
        let ben = seed_patient(&conn, "Ben");
        let dre = seed_doctor(&conn, "Dr Reyes", "Cardiology");
        let appt = seed_appointment(&conn, &ana, &dre, ref_now(), AppointmentStatus::Pending);

        assert!(matches!(
            delete(&conn, &appt.id, &ben),
            Err(ServiceError::Forbidden(_))
        ));
        delete(&conn, &appt.id, &ana).unwrap();
        assert!(matches!(
            get(&conn, &appt.id),
            Err(ServiceError::NotFound { .. })
        ));
        assert!(matches!(
            delete(&conn, &appt.id, &ana),
            Err(ServiceError::NotFound { .. })
        ));
    }
}
