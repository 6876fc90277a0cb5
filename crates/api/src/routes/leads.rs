//! Public lead submission

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use covera_core::SubmissionReceipt;
use covera_domain::LeadSubmission;
use serde::Serialize;

use super::ApiError;
use crate::context::AppContext;
use crate::utils::logging::timed;

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionResponse {
    success: bool,
    #[serde(flatten)]
    receipt: SubmissionReceipt,
}

pub(crate) async fn submit(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<LeadSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    let Json(submission) = payload?;
    let receipt = timed("leads::submit", ctx.leads.submit(submission)).await?;
    Ok((StatusCode::CREATED, Json(SubmissionResponse { success: true, receipt })))
}
