//! Admin console routes. Every route identifies the caller by `x-admin-id`.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use covera_core::LeadFilter;
use covera_domain::{Admin, Availability, Lead, LeadStatus, NewAdmin};
use serde::Deserialize;

use super::{caller_id, ok, require_caller, ApiError, Envelope};
use crate::context::AppContext;
use crate::utils::logging::timed;

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

#[derive(Debug, Deserialize)]
pub(crate) struct StatusChange {
    status: LeadStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Reassignment {
    admin_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AvailabilityChange {
    availability: Availability,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActiveChange {
    active: bool,
}

/* -------------------------------------------------------------------------- */
/* Leads */
/* -------------------------------------------------------------------------- */

pub(crate) async fn list_leads(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    filter: Result<Query<LeadFilter>, QueryRejection>,
) -> ApiResult<Vec<Lead>> {
    let caller = require_caller(&headers)?;
    let Query(filter) = filter?;
    let leads = timed("admin::list_leads", ctx.leads.list_for_viewer(&caller, filter)).await?;
    Ok(ok(leads))
}

pub(crate) async fn get_lead(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Lead> {
    let caller = require_caller(&headers)?;
    let lead = timed("admin::get_lead", ctx.leads.get_for_viewer(&caller, &id)).await?;
    Ok(ok(lead))
}

pub(crate) async fn advance_status(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<StatusChange>, JsonRejection>,
) -> ApiResult<Lead> {
    let caller = require_caller(&headers)?;
    let Json(change) = payload?;
    let lead =
        timed("admin::advance_status", ctx.leads.advance_status(&caller, &id, change.status))
            .await?;
    Ok(ok(lead))
}

pub(crate) async fn reassign(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<Reassignment>, JsonRejection>,
) -> ApiResult<Lead> {
    let caller = require_caller(&headers)?;
    let Json(body) = payload?;
    let lead = timed("admin::reassign", ctx.leads.reassign(&caller, &id, &body.admin_id)).await?;
    Ok(ok(lead))
}

/* -------------------------------------------------------------------------- */
/* Admins */
/* -------------------------------------------------------------------------- */

/// The header is optional here: the very first admin registers without one.
pub(crate) async fn register_admin(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    payload: Result<Json<NewAdmin>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Admin>>), ApiError> {
    let caller = caller_id(&headers);
    let Json(request) = payload?;
    let admin =
        timed("admin::register_admin", ctx.admins.register(caller.as_deref(), request)).await?;
    Ok((StatusCode::CREATED, ok(admin)))
}

pub(crate) async fn list_admins(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
) -> ApiResult<Vec<Admin>> {
    let caller = require_caller(&headers)?;
    let admins = timed("admin::list_admins", ctx.admins.list(&caller)).await?;
    Ok(ok(admins))
}

pub(crate) async fn set_availability(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<AvailabilityChange>, JsonRejection>,
) -> ApiResult<Admin> {
    let caller = require_caller(&headers)?;
    let Json(body) = payload?;
    let admin = timed(
        "admin::set_availability",
        ctx.admins.set_availability(&caller, &id, body.availability),
    )
    .await?;
    Ok(ok(admin))
}

pub(crate) async fn set_active(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<ActiveChange>, JsonRejection>,
) -> ApiResult<Admin> {
    let caller = require_caller(&headers)?;
    let Json(body) = payload?;
    let admin = timed("admin::set_active", ctx.admins.set_active(&caller, &id, body.active)).await?;
    Ok(ok(admin))
}
