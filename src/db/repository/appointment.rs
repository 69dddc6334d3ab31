use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::{parse_db_timestamp, parse_db_uuid, to_db_timestamp, DatabaseError};
use crate::models::*;

const APPOINTMENT_COLUMNS: &str = "a.id, a.patient_id, a.doctor_id, a.appointment_date,
     a.duration_minutes, a.reason_for_visit, a.status, a.notes, a.created_at";

struct AppointmentRow {
    id: String,
    patient_id: String,
    doctor_id: String,
    appointment_date: String,
    duration_minutes: u32,
    reason_for_visit: String,
    status: String,
    notes: Option<String>,
    created_at: String,
}

impl AppointmentRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            doctor_id: row.get(2)?,
            appointment_date: row.get(3)?,
            duration_minutes: row.get(4)?,
            reason_for_visit: row.get(5)?,
            status: row.get(6)?,
            notes: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DatabaseError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: parse_db_uuid("appointments.id", &row.id)?,
            patient_id: parse_db_uuid("appointments.patient_id", &row.patient_id)?,
            doctor_id: parse_db_uuid("appointments.doctor_id", &row.doctor_id)?,
            appointment_date: parse_db_timestamp(
                "appointments.appointment_date",
                &row.appointment_date,
            )?,
            duration_minutes: row.duration_minutes,
            reason_for_visit: row.reason_for_visit,
            status: AppointmentStatus::from_str(&row.status)?,
            notes: row.notes,
            created_at: parse_db_timestamp("appointments.created_at", &row.created_at)?,
        })
    }
}

/// Column that binds an appointment to a caller of the given role.
fn owner_column(role: Role) -> &'static str {
    match role {
        Role::Patient => "a.patient_id",
        Role::Doctor => "a.doctor_id",
    }
}

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, patient_id, doctor_id, appointment_date, duration_minutes,
         reason_for_visit, status, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            appt.id.to_string(),
            appt.patient_id.to_string(),
            appt.doctor_id.to_string(),
            to_db_timestamp(&appt.appointment_date),
            appt.duration_minutes,
            appt.reason_for_visit,
            appt.status.as_str(),
            appt.notes,
            to_db_timestamp(&appt.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_appointment(conn: &Connection, id: &Uuid) -> Result<Option<Appointment>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments a WHERE a.id = ?1"),
            params![id.to_string()],
            AppointmentRow::from_row,
        )
        .optional()?;
    row.map(Appointment::try_from).transpose()
}

/// Appointments owned by `profile_id` in the given role, ascending by date.
/// Both range bounds are inclusive and optional.
pub fn list_appointments_for_owner(
    conn: &Connection,
    role: Role,
    profile_id: &Uuid,
    range: &DateRange,
) -> Result<Vec<Appointment>, DatabaseError> {
    let sql = format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments a
         WHERE {owner} = ?1
           AND (?2 IS NULL OR a.appointment_date >= ?2)
           AND (?3 IS NULL OR a.appointment_date <= ?3)
         ORDER BY a.appointment_date ASC, a.created_at ASC, a.id ASC",
        owner = owner_column(role),
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![
            profile_id.to_string(),
            range.start_date.as_ref().map(to_db_timestamp),
            range.end_date.as_ref().map(to_db_timestamp),
        ],
        AppointmentRow::from_row,
    )?;

    let mut out = Vec::new();
    for row in rows {
        out.push(Appointment::try_from(row?)?);
    }
    Ok(out)
}

/// Every owned appointment joined with the counterpart's name, ascending by date.
///
/// Patients see the doctor's name and specialty; doctors see the patient's name.
pub fn list_appointment_cards(
    conn: &Connection,
    role: Role,
    profile_id: &Uuid,
) -> Result<Vec<AppointmentCard>, DatabaseError> {
    let join = match role {
        Role::Patient => {
            "JOIN doctor_profiles cp ON cp.id = a.doctor_id
             JOIN accounts u ON u.id = cp.account_id"
        }
        Role::Doctor => {
            "JOIN patient_profiles cp ON cp.id = a.patient_id
             JOIN accounts u ON u.id = cp.account_id"
        }
    };
    let specialty = match role {
        Role::Patient => "cp.specialty",
        Role::Doctor => "NULL",
    };
    let sql = format!(
        "SELECT {APPOINTMENT_COLUMNS}, u.name, {specialty}
         FROM appointments a
         {join}
         WHERE {owner} = ?1
         ORDER BY a.appointment_date ASC, a.created_at ASC, a.id ASC",
        owner = owner_column(role),
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![profile_id.to_string()], |row| {
        Ok((
            AppointmentRow::from_row(row)?,
            row.get::<_, String>(9)?,
            row.get::<_, Option<String>>(10)?,
        ))
    })?;

    let mut out = Vec::new();
    for row in rows {
        let (appt, counterpart_name, counterpart_specialty) = row?;
        out.push(AppointmentCard {
            appointment: Appointment::try_from(appt)?,
            counterpart_name,
            counterpart_specialty,
        });
    }
    Ok(out)
}

/// Compare-and-set on `status`. Returns `false` when the stored status no
/// longer equals `expected` (or the row is gone); nothing is written then.
pub fn update_appointment_status_if(
    conn: &Connection,
    id: &Uuid,
    expected: AppointmentStatus,
    next: AppointmentStatus,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET status = ?1 WHERE id = ?2 AND status = ?3",
        params![next.as_str(), id.to_string(), expected.as_str()],
    )?;
    Ok(changed == 1)
}

pub fn delete_appointment(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM appointments WHERE id = ?1",
        params![id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Appointment".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}
