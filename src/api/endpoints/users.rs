//! Account self-service endpoints.
//!
//! - `GET /api/users/profile`
//! - `PATCH /api/users/profile`
//! - `PATCH /api/users/password` — other sessions are revoked

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde::Deserialize;

use crate::account::{self, ProfileUpdate, ProfileView};
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ApiContext, CallerContext};

/// `GET /api/users/profile`
pub async fn profile(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
) -> Result<Json<ProfileView>, ApiError> {
    let conn = ctx.core.open_db()?;
    Ok(Json(account::get_profile(&conn, &auth.caller)?))
}

/// `PATCH /api/users/profile`
pub async fn update_profile(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
    ApiJson(changes): ApiJson<ProfileUpdate>,
) -> Result<Json<ProfileView>, ApiError> {
    let conn = ctx.core.open_db()?;
    let view = account::update_profile(&conn, &auth.caller, changes, Utc::now())?;
    Ok(Json(view))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// `PATCH /api/users/password`
pub async fn change_password(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
    ApiJson(change): ApiJson<PasswordChange>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.core.open_db()?;
    account::change_password(
        &conn,
        &ctx.core.settings,
        &auth.caller.identity(),
        &change.current_password,
        &change.new_password,
        Some(&auth.token_hash),
        Utc::now(),
    )?;
    Ok(StatusCode::NO_CONTENT)
}
