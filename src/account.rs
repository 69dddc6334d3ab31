//! Accounts and sessions: registration, login, bearer-token authentication,
//! profile edits, password change and the doctor directory.
//!
//! Registration creates the account and its matching empty profile in one
//! transaction, so profile resolution never finds an account without one.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Settings;
use crate::crypto::{self, CryptoError};
use crate::db::repository;
use crate::error::{FieldErrors, ServiceError};
use crate::identity::{Caller, Identity};
use crate::models::{
    Account, AccountSummary, DoctorListing, DoctorProfile, PatientProfile, Role,
};

pub const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_AGE: i64 = 150;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// ─── Types ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub credentials: Option<String>,
}

/// Issued on login. `token` is shown to the client once; only its hash is stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub account: AccountSummary,
}

/// Partial update; absent fields are left unchanged. Fields belonging to the
/// other role's profile are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub specialty: Option<String>,
    pub credentials: Option<String>,
    pub office_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub account: AccountSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_profile: Option<PatientProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_profile: Option<DoctorProfile>,
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ─── Registration & sessions ──────────────────────────────────────────────────

pub fn register(
    conn: &Connection,
    settings: &Settings,
    request: RegisterRequest,
    now: DateTime<Utc>,
) -> Result<AccountSummary, ServiceError> {
    let email = normalize_email(&request.email);

    let mut errors = FieldErrors::new();
    errors.require_text(&request.name, "name");
    errors.check(is_valid_email(&email), "email is not a valid address");
    errors.check(
        request.password.chars().count() >= MIN_PASSWORD_LENGTH,
        "password must be at least 6 characters",
    );
    errors.finish()?;

    let account = Account {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        email,
        password_hash: crypto::hash_password(&request.password, settings.pbkdf2_iterations),
        role: request.role,
        created_at: now,
        updated_at: now,
    };

    let tx = conn.unchecked_transaction()?;
    repository::insert_account(&tx, &account)?;
    match account.role {
        Role::Patient => {
            repository::insert_patient_profile(&tx, &PatientProfile::empty(account.id))?;
        }
        Role::Doctor => {
            let mut profile = DoctorProfile::empty(account.id);
            profile.specialty = non_blank(request.specialty);
            profile.credentials = non_blank(request.credentials);
            repository::insert_doctor_profile(&tx, &profile)?;
        }
    }
    tx.commit()?;

    tracing::info!(account_id = %account.id, role = %account.role, "account registered");
    Ok(AccountSummary::from(&account))
}

/// Exchange credentials for a bearer session. Unknown email and wrong
/// password fail identically.
pub fn login(
    conn: &Connection,
    settings: &Settings,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<LoginSession, ServiceError> {
    let Some(account) = repository::find_account_by_email(conn, &normalize_email(email))? else {
        // Same work factor as a real check.
        let _ = crypto::hash_password(password, settings.pbkdf2_iterations);
        tracing::warn!("login failed");
        return Err(ServiceError::Unauthorized);
    };

    match crypto::verify_password(password, &account.password_hash) {
        Ok(()) => {}
        Err(CryptoError::WrongPassword) => {
            tracing::warn!(account_id = %account.id, "login failed");
            return Err(ServiceError::Unauthorized);
        }
        Err(e) => return Err(e.into()),
    }

    repository::prune_expired_sessions(conn, &now)?;

    let token = crypto::generate_token();
    let expires_at = now + settings.session_ttl();
    repository::insert_session(conn, &crypto::hash_token(&token), &account.id, &now, &expires_at)?;

    tracing::info!(account_id = %account.id, "session opened");
    Ok(LoginSession {
        token,
        expires_at,
        account: AccountSummary::from(&account),
    })
}

/// Resolve a bearer token to the identity it was issued for.
pub fn authenticate(
    conn: &Connection,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Identity, ServiceError> {
    let hash = crypto::hash_token(token);
    let session = repository::find_session(conn, &hash)?.ok_or(ServiceError::Unauthorized)?;
    if session.expires_at <= now {
        repository::delete_session(conn, &hash)?;
        return Err(ServiceError::Unauthorized);
    }
    Ok(Identity {
        account_id: session.account_id,
        role: session.role,
    })
}

pub fn logout(conn: &Connection, token: &str) -> Result<(), ServiceError> {
    if repository::delete_session(conn, &crypto::hash_token(token))? {
        tracing::info!("session closed");
    }
    Ok(())
}

// ─── Profile management ───────────────────────────────────────────────────────

pub fn get_profile(conn: &Connection, caller: &Caller) -> Result<ProfileView, ServiceError> {
    let account = repository::get_account(conn, &caller.account_id)?
        .ok_or_else(|| ServiceError::not_found("Account", caller.account_id))?;
    let (patient_profile, doctor_profile) = match caller.role {
        Role::Patient => (
            Some(
                repository::get_patient_profile(conn, &caller.profile_id)?
                    .ok_or_else(|| ServiceError::not_found("PatientProfile", caller.profile_id))?,
            ),
            None,
        ),
        Role::Doctor => (
            None,
            Some(
                repository::get_doctor_profile(conn, &caller.profile_id)?
                    .ok_or_else(|| ServiceError::not_found("DoctorProfile", caller.profile_id))?,
            ),
        ),
    };
    Ok(ProfileView {
        account: AccountSummary::from(&account),
        patient_profile,
        doctor_profile,
    })
}

pub fn update_profile(
    conn: &Connection,
    caller: &Caller,
    changes: ProfileUpdate,
    now: DateTime<Utc>,
) -> Result<ProfileView, ServiceError> {
    let email = changes.email.as_deref().map(normalize_email);

    let mut errors = FieldErrors::new();
    if let Some(name) = &changes.name {
        errors.require_text(name, "name");
    }
    if let Some(email) = &email {
        errors.check(is_valid_email(email), "email is not a valid address");
    }
    if let Some(age) = changes.age {
        errors.check((0..=MAX_AGE).contains(&age), "age must be between 0 and 150");
    }
    errors.finish()?;

    let tx = conn.unchecked_transaction()?;
    let account = repository::get_account(&tx, &caller.account_id)?
        .ok_or_else(|| ServiceError::not_found("Account", caller.account_id))?;

    if changes.name.is_some() || email.is_some() {
        let name = changes
            .name
            .as_deref()
            .map(str::trim)
            .unwrap_or(account.name.as_str());
        let email = email.as_deref().unwrap_or(account.email.as_str());
        repository::update_account_identity(&tx, &account.id, name, email, &now)?;
    }

    match caller.role {
        Role::Patient => {
            let mut profile = repository::get_patient_profile(&tx, &caller.profile_id)?
                .ok_or_else(|| ServiceError::not_found("PatientProfile", caller.profile_id))?;
            if let Some(dob) = changes.date_of_birth {
                profile.date_of_birth = Some(dob);
            }
            if let Some(address) = changes.address {
                profile.address = non_blank(Some(address));
            }
            if let Some(phone) = changes.phone_number {
                profile.phone_number = non_blank(Some(phone));
            }
            if let Some(age) = changes.age {
                profile.age = u32::try_from(age).ok();
            }
            if let Some(gender) = changes.gender {
                profile.gender = non_blank(Some(gender));
            }
            repository::update_patient_profile(&tx, &profile)?;
        }
        Role::Doctor => {
            let mut profile = repository::get_doctor_profile(&tx, &caller.profile_id)?
                .ok_or_else(|| ServiceError::not_found("DoctorProfile", caller.profile_id))?;
            if let Some(specialty) = changes.specialty {
                profile.specialty = non_blank(Some(specialty));
            }
            if let Some(credentials) = changes.credentials {
                profile.credentials = non_blank(Some(credentials));
            }
            if let Some(office) = changes.office_address {
                profile.office_address = non_blank(Some(office));
            }
            repository::update_doctor_profile(&tx, &profile)?;
        }
    }
    tx.commit()?;

    tracing::info!(account_id = %caller.account_id, "profile updated");
    get_profile(conn, caller)
}

/// Replace the password after checking the current one. Every other session
/// of the account is revoked; `keep` is the session making the request.
pub fn change_password(
    conn: &Connection,
    settings: &Settings,
    identity: &Identity,
    current_password: &str,
    new_password: &str,
    keep: Option<&[u8; 32]>,
    now: DateTime<Utc>,
) -> Result<(), ServiceError> {
    let mut errors = FieldErrors::new();
    errors.check(
        new_password.chars().count() >= MIN_PASSWORD_LENGTH,
        "newPassword must be at least 6 characters",
    );
    errors.finish()?;

    let account = repository::get_account(conn, &identity.account_id)?
        .ok_or_else(|| ServiceError::not_found("Account", identity.account_id))?;

    match crypto::verify_password(current_password, &account.password_hash) {
        Ok(()) => {}
        Err(CryptoError::WrongPassword) => {
            tracing::warn!(account_id = %account.id, "password change rejected");
            return Err(ServiceError::Validation(vec![
                "currentPassword is incorrect".into(),
            ]));
        }
        Err(e) => return Err(e.into()),
    }

    let hash = crypto::hash_password(new_password, settings.pbkdf2_iterations);
    let tx = conn.unchecked_transaction()?;
    repository::update_password_hash(&tx, &account.id, &hash, &now)?;
    let revoked = repository::delete_other_sessions(&tx, &account.id, keep)?;
    tx.commit()?;

    tracing::info!(account_id = %account.id, revoked, "password changed");
    Ok(())
}

pub fn list_doctors(conn: &Connection) -> Result<Vec<DoctorListing>, ServiceError> {
    Ok(repository::list_doctors(conn)?)
}
