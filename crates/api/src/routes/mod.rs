//! HTTP routes

mod admin;
mod commissions;
pub mod error;
mod health;
mod leads;
mod partners;

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use covera_domain::CoveraError;
pub use error::ApiError;
use serde::Serialize;

use crate::context::AppContext;

/// Header carrying the authenticated admin's id
pub const ADMIN_ID_HEADER: &str = "x-admin-id";

/// Successful response body: `{ success: true, data }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

pub(crate) fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope { success: true, data })
}

/// Caller id from `x-admin-id`, if present and non-empty.
pub(crate) fn caller_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(ADMIN_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(crate) fn require_caller(headers: &HeaderMap) -> Result<String, ApiError> {
    caller_id(headers)
        .ok_or_else(|| ApiError(CoveraError::Auth(format!("missing {ADMIN_ID_HEADER} header"))))
}

/// Build the application router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Health
        .route("/api/health", get(health::health))
        // Public lead intake
        .route("/api/leads", post(leads::submit))
        // Commissions
        .route("/api/commissions", post(commissions::process))
        .route("/api/commissions/preview", get(commissions::preview))
        // Admin console
        .route("/api/admin/leads", get(admin::list_leads))
        .route("/api/admin/leads/{id}", get(admin::get_lead))
        .route("/api/admin/leads/{id}/status", patch(admin::advance_status))
        .route("/api/admin/leads/{id}/assignee", patch(admin::reassign))
        .route("/api/admin/admins", get(admin::list_admins).post(admin::register_admin))
        .route("/api/admin/admins/{id}/availability", patch(admin::set_availability))
        .route("/api/admin/admins/{id}/active", patch(admin::set_active))
        // Partners
        .route("/api/partners", post(partners::register))
        .route("/api/partners/{code}/dashboard", get(partners::dashboard))
        .with_state(ctx)
}
