//! Registration, login and logout endpoints.
//!
//! - `POST /api/auth/register` — unprotected
//! - `POST /api/auth/login` — unprotected
//! - `POST /api/auth/logout` — revokes the presented token

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::account::{self, LoginSession, RegisterRequest};
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::middleware::auth::bearer_token;
use crate::api::types::ApiContext;
use crate::models::AccountSummary;

/// `POST /api/auth/register`
pub async fn register(
    State(ctx): State<ApiContext>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountSummary>), ApiError> {
    let conn = ctx.core.open_db()?;
    let account = account::register(&conn, &ctx.core.settings, request, Utc::now())?;
    Ok((StatusCode::CREATED, Json(account)))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/login`
pub async fn login(
    State(ctx): State<ApiContext>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginSession>, ApiError> {
    let conn = ctx.core.open_db()?;
    let session = account::login(
        &conn,
        &ctx.core.settings,
        &request.email,
        &request.password,
        Utc::now(),
    )?;
    Ok(Json(session))
}

/// `POST /api/auth/logout`
pub async fn logout(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;
    let conn = ctx.core.open_db()?;
    account::logout(&conn, token)?;
    Ok(StatusCode::NO_CONTENT)
}
