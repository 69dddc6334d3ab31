use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AppointmentStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub reason_for_visit: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Appointment plus the display name of the other party, for dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCard {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub counterpart_name: String,
    pub counterpart_specialty: Option<String>,
}

impl AppointmentStatus {
    /// Statuses reachable in one step. Empty for terminal states.
    pub fn allowed_transitions(self) -> &'static [AppointmentStatus] {
        match self {
            Self::Pending => &[Self::Scheduled, Self::Canceled],
            Self::Scheduled => &[Self::Completed, Self::Canceled],
            Self::Completed | Self::Canceled => &[],
        }
    }

    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }
}
