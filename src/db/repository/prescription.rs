use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::{parse_db_timestamp, parse_db_uuid, to_db_timestamp, DatabaseError};
use crate::models::*;

const PRESCRIPTION_COLUMNS: &str = "p.id, p.appointment_id, p.patient_id, p.doctor_id,
     p.medication, p.dosage, p.frequency, p.start_date, p.end_date,
     p.refills_available, p.notes, p.created_at";

struct PrescriptionRow {
    id: String,
    appointment_id: Option<String>,
    patient_id: String,
    doctor_id: String,
    medication: String,
    dosage: String,
    frequency: String,
    start_date: String,
    end_date: Option<String>,
    refills_available: u32,
    notes: Option<String>,
    created_at: String,
}

impl PrescriptionRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            appointment_id: row.get(1)?,
            patient_id: row.get(2)?,
            doctor_id: row.get(3)?,
            medication: row.get(4)?,
            dosage: row.get(5)?,
            frequency: row.get(6)?,
            start_date: row.get(7)?,
            end_date: row.get(8)?,
            refills_available: row.get(9)?,
            notes: row.get(10)?,
            created_at: row.get(11)?,
        })
    }
}

impl TryFrom<PrescriptionRow> for Prescription {
    type Error = DatabaseError;

    fn try_from(row: PrescriptionRow) -> Result<Self, Self::Error> {
        Ok(Prescription {
            id: parse_db_uuid("prescriptions.id", &row.id)?,
            appointment_id: row
                .appointment_id
                .as_deref()
                .map(|id| parse_db_uuid("prescriptions.appointment_id", id))
                .transpose()?,
            patient_id: parse_db_uuid("prescriptions.patient_id", &row.patient_id)?,
            doctor_id: parse_db_uuid("prescriptions.doctor_id", &row.doctor_id)?,
            medication: row.medication,
            dosage: row.dosage,
            frequency: row.frequency,
            start_date: parse_db_timestamp("prescriptions.start_date", &row.start_date)?,
            end_date: row
                .end_date
                .as_deref()
                .map(|d| parse_db_timestamp("prescriptions.end_date", d))
                .transpose()?,
            refills_available: row.refills_available,
            notes: row.notes,
            created_at: parse_db_timestamp("prescriptions.created_at", &row.created_at)?,
        })
    }
}

pub fn insert_prescription(conn: &Connection, rx: &Prescription) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO prescriptions (id, appointment_id, patient_id, doctor_id, medication, dosage,
         frequency, start_date, end_date, refills_available, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            rx.id.to_string(),
            rx.appointment_id.map(|id| id.to_string()),
            rx.patient_id.to_string(),
            rx.doctor_id.to_string(),
            rx.medication,
            rx.dosage,
            rx.frequency,
            to_db_timestamp(&rx.start_date),
            rx.end_date.as_ref().map(to_db_timestamp),
            rx.refills_available,
            rx.notes,
            to_db_timestamp(&rx.created_at),
        ],
    )?;
    Ok(())
}

/// Prescriptions issued against one appointment, in creation order.
pub fn list_prescriptions_for_appointment(
    conn: &Connection,
    appointment_id: &Uuid,
) -> Result<Vec<Prescription>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions p
         WHERE p.appointment_id = ?1
         ORDER BY p.created_at ASC, p.rowid ASC"
    ))?;
    let rows = stmt.query_map(
        params![appointment_id.to_string()],
        PrescriptionRow::from_row,
    )?;

    let mut out = Vec::new();
    for row in rows {
        out.push(Prescription::try_from(row?)?);
    }
    Ok(out)
}

/// All of a patient's prescriptions with the prescriber's name, newest first.
pub fn list_prescription_cards_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<PrescriptionCard>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PRESCRIPTION_COLUMNS}, u.name
         FROM prescriptions p
         JOIN doctor_profiles d ON d.id = p.doctor_id
         JOIN accounts u ON u.id = d.account_id
         WHERE p.patient_id = ?1
         ORDER BY p.created_at DESC, p.rowid DESC"
    ))?;
    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok((PrescriptionRow::from_row(row)?, row.get::<_, String>(12)?))
    })?;

    let mut out = Vec::new();
    for row in rows {
        let (rx, doctor_name) = row?;
        out.push(PrescriptionCard {
            prescription: Prescription::try_from(rx)?,
            doctor_name,
        });
    }
    Ok(out)
}
