//! Dashboard endpoint.

use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, CallerContext};
use crate::dashboard::{self, Dashboard};

/// `GET /api/me/dashboard` — role-specific dashboard, partitioned at request time.
pub async fn show(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<CallerContext>,
) -> Result<Json<Dashboard>, ApiError> {
    let conn = ctx.core.open_db()?;
    let dashboard = dashboard::build_for_caller(&conn, &auth.caller, Utc::now())?;
    Ok(Json(dashboard))
}
