use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

impl PatientProfile {
    /// The empty profile created alongside a new patient account.
    pub fn empty(account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            date_of_birth: None,
            address: None,
            phone_number: None,
            age: None,
            gender: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub specialty: Option<String>,
    pub credentials: Option<String>,
    pub office_address: Option<String>,
}

impl DoctorProfile {
    pub fn empty(account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            specialty: None,
            credentials: None,
            office_address: None,
        }
    }
}

/// Doctor directory entry shown when booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorListing {
    pub profile_id: Uuid,
    pub name: String,
    pub specialty: Option<String>,
    pub credentials: Option<String>,
}

/// Patient as seen from a doctor's dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub profile_id: Uuid,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
}
