use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: Uuid,
    /// `None` once the originating appointment has been deleted.
    pub appointment_id: Option<Uuid>,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub refills_available: u32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Prescription {
    /// Active at `now`: no end date, or an end date not yet passed.
    pub fn is_active_at(&self, now: &DateTime<Utc>) -> bool {
        self.end_date.map_or(true, |end| end >= *now)
    }
}

/// Prescription plus the prescriber's name, for the patient dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionCard {
    #[serde(flatten)]
    pub prescription: Prescription,
    pub doctor_name: String,
}
