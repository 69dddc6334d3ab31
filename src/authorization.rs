//! Ownership guard for appointment records. Prescriptions are gated
//! through the appointment they were issued for.
//!
//! One rule per role, default-deny:
//! - PATIENT caller → allowed iff `record.patient_id == caller.profile_id`
//! - DOCTOR caller → allowed iff `record.doctor_id == caller.profile_id`
//!
//! No administrative bypass, no cross-role escalation.

use uuid::Uuid;

use crate::error::ServiceError;
use crate::identity::Caller;
use crate::models::{Appointment, Role};

/// A record bound to one patient profile and one doctor profile.
pub trait OwnedRecord {
    fn patient_id(&self) -> Uuid;
    fn doctor_id(&self) -> Uuid;
}

impl OwnedRecord for Appointment {
    fn patient_id(&self) -> Uuid {
        self.patient_id
    }

    fn doctor_id(&self) -> Uuid {
        self.doctor_id
    }
}

/// Why access was granted (or denied).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessReason {
    /// Caller is the record's patient.
    PatientOwner,
    /// Caller is the record's doctor.
    DoctorOwner,
    /// No matching rule.
    Denied,
}

/// Result of an ownership check.
#[derive(Debug, Clone, Copy)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: AccessReason,
}

impl AccessDecision {
    fn allow(reason: AccessReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny() -> Self {
        Self {
            allowed: false,
            reason: AccessReason::Denied,
        }
    }
}

/// Decide whether `caller` owns `record`.
pub fn check_record_access(record: &impl OwnedRecord, caller: &Caller) -> AccessDecision {
    match caller.role {
        Role::Patient if record.patient_id() == caller.profile_id => {
            AccessDecision::allow(AccessReason::PatientOwner)
        }
        Role::Doctor if record.doctor_id() == caller.profile_id => {
            AccessDecision::allow(AccessReason::DoctorOwner)
        }
        Role::Patient | Role::Doctor => AccessDecision::deny(),
    }
}

/// `Ok` when the caller owns the record, `Forbidden` otherwise.
pub fn assert_owner(record: &impl OwnedRecord, caller: &Caller) -> Result<(), ServiceError> {
    if check_record_access(record, caller).allowed {
        Ok(())
    } else {
        tracing::warn!(
            account_id = %caller.account_id,
            role = %caller.role,
            "ownership check denied"
        );
        Err(ServiceError::Forbidden(
            "record belongs to another profile".into(),
        ))
    }
}
