//! Audit logging middleware.
//!
//! Logs every API request with method, path, response status and the
//! caller's account id. Runs innermost (after auth has injected CallerContext).

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::api::types::CallerContext;

/// Log API access for audit trail.
pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let account_id = req
        .extensions()
        .get::<CallerContext>()
        .map(|c| c.caller.account_id.to_string());

    let response = next.run(req).await;

    tracing::info!(
        %method,
        path,
        status = response.status().as_u16(),
        account_id = account_id.as_deref().unwrap_or("-"),
        "api access"
    );
    response
}
