//! Partner registration and dashboard

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use covera_core::PartnerDashboard;
use covera_domain::{NewPartner, Partner};

use super::{ok, ApiError, Envelope};
use crate::context::AppContext;
use crate::utils::logging::timed;

pub(crate) async fn register(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<NewPartner>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Partner>>), ApiError> {
    let Json(request) = payload?;
    let partner = timed("partners::register", ctx.partners.register(request)).await?;
    Ok((StatusCode::CREATED, ok(partner)))
}

pub(crate) async fn dashboard(
    State(ctx): State<Arc<AppContext>>,
    Path(code): Path<String>,
) -> Result<Json<Envelope<PartnerDashboard>>, ApiError> {
    let dashboard = timed("partners::dashboard", ctx.partners.dashboard(&code)).await?;
    Ok(ok(dashboard))
}
