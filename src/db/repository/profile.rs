use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::{parse_db_uuid, DatabaseError};
use crate::models::*;

fn parse_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())
}

// ── Patient profiles ────────────────────────────────────────

const PATIENT_COLUMNS: &str =
    "id, account_id, date_of_birth, address, phone_number, age, gender";

struct PatientRow {
    id: String,
    account_id: String,
    date_of_birth: Option<String>,
    address: Option<String>,
    phone_number: Option<String>,
    age: Option<u32>,
    gender: Option<String>,
}

impl PatientRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            account_id: row.get(1)?,
            date_of_birth: row.get(2)?,
            address: row.get(3)?,
            phone_number: row.get(4)?,
            age: row.get(5)?,
            gender: row.get(6)?,
        })
    }
}

impl TryFrom<PatientRow> for PatientProfile {
    type Error = DatabaseError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        Ok(PatientProfile {
            id: parse_db_uuid("patient_profiles.id", &row.id)?,
            account_id: parse_db_uuid("patient_profiles.account_id", &row.account_id)?,
            date_of_birth: parse_date(row.date_of_birth),
            address: row.address,
            phone_number: row.phone_number,
            age: row.age,
            gender: row.gender,
        })
    }
}

pub fn insert_patient_profile(
    conn: &Connection,
    profile: &PatientProfile,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patient_profiles (id, account_id, date_of_birth, address, phone_number, age, gender)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            profile.id.to_string(),
            profile.account_id.to_string(),
            profile.date_of_birth.map(|d| d.to_string()),
            profile.address,
            profile.phone_number,
            profile.age,
            profile.gender,
        ],
    )?;
    Ok(())
}

pub fn get_patient_profile(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<PatientProfile>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patient_profiles WHERE id = ?1"),
            params![id.to_string()],
            PatientRow::from_row,
        )
        .optional()?;
    row.map(PatientProfile::try_from).transpose()
}

pub fn find_patient_profile_by_account(
    conn: &Connection,
    account_id: &Uuid,
) -> Result<Option<PatientProfile>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patient_profiles WHERE account_id = ?1"),
            params![account_id.to_string()],
            PatientRow::from_row,
        )
        .optional()?;
    row.map(PatientProfile::try_from).transpose()
}

pub fn update_patient_profile(
    conn: &Connection,
    profile: &PatientProfile,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE patient_profiles
         SET date_of_birth = ?1, address = ?2, phone_number = ?3, age = ?4, gender = ?5
         WHERE id = ?6",
        params![
            profile.date_of_birth.map(|d| d.to_string()),
            profile.address,
            profile.phone_number,
            profile.age,
            profile.gender,
            profile.id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "PatientProfile".into(),
            id: profile.id.to_string(),
        });
    }
    Ok(())
}

/// Patient profile joined with the owning account's display name.
pub fn get_patient_summary(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<PatientSummary>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT p.id, u.name, p.date_of_birth, p.age, p.gender, p.phone_number
             FROM patient_profiles p
             JOIN accounts u ON u.id = p.account_id
             WHERE p.id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<u32>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                ))
            },
        )
        .optional()?;

    row.map(|(pid, name, dob, age, gender, phone)| {
        Ok(PatientSummary {
            profile_id: parse_db_uuid("patient_profiles.id", &pid)?,
            name,
            date_of_birth: parse_date(dob),
            age,
            gender,
            phone_number: phone,
        })
    })
    .transpose()
}

// ── Doctor profiles ─────────────────────────────────────────

const DOCTOR_COLUMNS: &str = "id, account_id, specialty, credentials, office_address";

struct DoctorRow {
    id: String,
    account_id: String,
    specialty: Option<String>,
    credentials: Option<String>,
    office_address: Option<String>,
}

impl DoctorRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            account_id: row.get(1)?,
            specialty: row.get(2)?,
            credentials: row.get(3)?,
            office_address: row.get(4)?,
        })
    }
}

impl TryFrom<DoctorRow> for DoctorProfile {
    type Error = DatabaseError;

    fn try_from(row: DoctorRow) -> Result<Self, Self::Error> {
        Ok(DoctorProfile {
            id: parse_db_uuid("doctor_profiles.id", &row.id)?,
            account_id: parse_db_uuid("doctor_profiles.account_id", &row.account_id)?,
            specialty: row.specialty,
            credentials: row.credentials,
            office_address: row.office_address,
        })
    }
}

pub fn insert_doctor_profile(
    conn: &Connection,
    profile: &DoctorProfile,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctor_profiles (id, account_id, specialty, credentials, office_address)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            profile.id.to_string(),
            profile.account_id.to_string(),
            profile.specialty,
            profile.credentials,
            profile.office_address,
        ],
    )?;
    Ok(())
}

pub fn get_doctor_profile(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<DoctorProfile>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {DOCTOR_COLUMNS} FROM doctor_profiles WHERE id = ?1"),
            params![id.to_string()],
            DoctorRow::from_row,
        )
        .optional()?;
    row.map(DoctorProfile::try_from).transpose()
}

pub fn find_doctor_profile_by_account(
    conn: &Connection,
    account_id: &Uuid,
) -> Result<Option<DoctorProfile>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {DOCTOR_COLUMNS} FROM doctor_profiles WHERE account_id = ?1"),
            params![account_id.to_string()],
            DoctorRow::from_row,
        )
        .optional()?;
    row.map(DoctorProfile::try_from).transpose()
}

pub fn update_doctor_profile(
    conn: &Connection,
    profile: &DoctorProfile,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE doctor_profiles SET specialty = ?1, credentials = ?2, office_address = ?3
         WHERE id = ?4",
        params![
            profile.specialty,
            profile.credentials,
            profile.office_address,
            profile.id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "DoctorProfile".into(),
            id: profile.id.to_string(),
        });
    }
    Ok(())
}

/// Doctor directory ordered by name.
pub fn list_doctors(conn: &Connection) -> Result<Vec<DoctorListing>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT d.id, u.name, d.specialty, d.credentials
         FROM doctor_profiles d
         JOIN accounts u ON u.id = d.account_id
         ORDER BY u.name ASC, d.id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut doctors = Vec::new();
    for row in rows {
        let (id, name, specialty, credentials) = row?;
        doctors.push(DoctorListing {
            profile_id: parse_db_uuid("doctor_profiles.id", &id)?,
            name,
            specialty,
            credentials,
        });
    }
    Ok(doctors)
}
