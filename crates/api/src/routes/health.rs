use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tokio::task;

use crate::context::AppContext;

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    version: &'static str,
    database: &'static str,
}

pub(crate) async fn health(State(ctx): State<Arc<AppContext>>) -> (StatusCode, Json<HealthResponse>) {
    let db = Arc::clone(&ctx.db);
    let database_ok = matches!(task::spawn_blocking(move || db.health_check()).await, Ok(Ok(())));

    let (code, status, database) = if database_ok {
        (StatusCode::OK, "ok", "ok")
    } else {
        tracing::warn!("health check: database unavailable");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
    };

    (code, Json(HealthResponse { status, version: env!("CARGO_PKG_VERSION"), database }))
}
