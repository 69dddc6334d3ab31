//! Profile resolution: session identity + role → domain profile id.
//!
//! Every core operation takes the caller explicitly; nothing reads an
//! ambient session.

use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::db::repository;
use crate::error::ServiceError;
use crate::models::Role;

/// Authenticated account and the role it was registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub account_id: Uuid,
    pub role: Role,
}

/// Identity resolved to the role's profile. Passed into every record-scoped operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Caller {
    pub account_id: Uuid,
    pub role: Role,
    pub profile_id: Uuid,
}

impl Caller {
    pub fn identity(&self) -> Identity {
        Identity {
            account_id: self.account_id,
            role: self.role,
        }
    }

    /// Fails `Forbidden` unless the caller holds `role`.
    pub fn require_role(&self, role: Role) -> Result<(), ServiceError> {
        if self.role == role {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(format!(
                "operation requires role {role}"
            )))
        }
    }
}

/// Look up the profile owned by `identity.account_id` whose kind matches
/// `identity.role`.
///
/// Registration creates the matching profile in the same transaction as the
/// account, so `NotFound` here means the store is inconsistent.
pub fn resolve(conn: &Connection, identity: &Identity) -> Result<Uuid, ServiceError> {
    let profile_id = match identity.role {
        Role::Patient => repository::find_patient_profile_by_account(conn, &identity.account_id)?
            .map(|p| p.id),
        Role::Doctor => repository::find_doctor_profile_by_account(conn, &identity.account_id)?
            .map(|p| p.id),
    };

    profile_id.ok_or_else(|| {
        tracing::warn!(account_id = %identity.account_id, role = %identity.role, "profile missing for account");
        let entity = match identity.role {
            Role::Patient => "PatientProfile",
            Role::Doctor => "DoctorProfile",
        };
        ServiceError::not_found(entity, identity.account_id)
    })
}

/// Resolve straight into a `Caller`.
pub fn resolve_caller(conn: &Connection, identity: &Identity) -> Result<Caller, ServiceError> {
    let profile_id = resolve(conn, identity)?;
    Ok(Caller {
        account_id: identity.account_id,
        role: identity.role,
        profile_id,
    })
}
