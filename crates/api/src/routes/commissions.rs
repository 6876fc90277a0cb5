//! Commission processing and the read-only calculator

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use covera_core::{CommissionOutcome, CommissionRequest};
use covera_domain::EarningBreakdown;
use serde::{Deserialize, Serialize};

use super::{ok, require_caller, ApiError, Envelope};
use crate::context::AppContext;
use crate::utils::logging::timed;

pub(crate) async fn process(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    payload: Result<Json<CommissionRequest>, JsonRejection>,
) -> Result<Json<Envelope<CommissionOutcome>>, ApiError> {
    let caller = require_caller(&headers)?;
    let Json(request) = payload?;
    let outcome = timed("commissions::process", ctx.earnings.process(&caller, request)).await?;
    Ok(ok(outcome))
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreviewQuery {
    product_type: String,
    total_premium: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct Preview {
    #[serde(flatten)]
    breakdown: EarningBreakdown,
    partner_earning_display: String,
}

pub(crate) async fn preview(
    State(ctx): State<Arc<AppContext>>,
    query: Result<Query<PreviewQuery>, QueryRejection>,
) -> Result<Json<Envelope<Preview>>, ApiError> {
    let Query(query) = query?;
    let breakdown = ctx.earnings.preview(&query.product_type, query.total_premium)?;
    let partner_earning_display = ctx.earnings.display_amount(breakdown.partner_earning);
    Ok(ok(Preview { partner_earning_display, breakdown }))
}
