//! Lead service - intake, status progression and reassignment

use std::sync::Arc;

use chrono::Utc;
use covera_domain::{CoveraError, Lead, LeadStatus, LeadSubmission, NewLead, Result};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::ports::{LeadFilter, LeadRepository};
use crate::admins::ports::AdminRepository;
use crate::admins::service::load_active_admin;
use crate::notifications::ports::{LeadNotification, LeadNotifier};
use crate::partners::ports::PartnerRepository;

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub lead_id: String,
    /// `None` when no admin was active at submission time.
    pub assigned_admin_id: Option<String>,
    pub status: LeadStatus,
}

/// Lead use cases
pub struct LeadService {
    leads: Arc<dyn LeadRepository>,
    admins: Arc<dyn AdminRepository>,
    partners: Arc<dyn PartnerRepository>,
    notifier: Arc<dyn LeadNotifier>,
}

impl LeadService {
    /// Create a new lead service
    pub fn new(
        leads: Arc<dyn LeadRepository>,
        admins: Arc<dyn AdminRepository>,
        partners: Arc<dyn PartnerRepository>,
        notifier: Arc<dyn LeadNotifier>,
    ) -> Self {
        Self { leads, admins, partners, notifier }
    }

    /// Validate and store a lead, assign it round-robin and notify.
    ///
    /// Notification failures are logged and do not fail the submission.
    pub async fn submit(&self, submission: LeadSubmission) -> Result<SubmissionReceipt> {
        submission.validate(Utc::now().date_naive())?;

        if let Some(code) = &submission.affiliate_code {
            if self.partners.get_by_code(code).await?.is_none() {
                return Err(CoveraError::InvalidInput(format!("unknown affiliate code: {code}")));
            }
        }

        let new_lead = NewLead {
            id: Uuid::now_v7().to_string(),
            contact: submission.contact,
            affiliate_code: submission.affiliate_code,
            details: submission.details,
            created_at: Utc::now(),
        };

        let lead = self.leads.insert_with_round_robin(new_lead).await?;

        match &lead.assigned_admin_id {
            Some(admin_id) => info!(
                lead_id = %lead.id,
                product_type = %lead.product_type,
                admin_id = %admin_id,
                "lead submitted and assigned"
            ),
            None => warn!(
                lead_id = %lead.id,
                product_type = %lead.product_type,
                "no active admins; lead left unassigned"
            ),
        }

        if let Err(err) = self.notifier.notify_new_lead(&LeadNotification::from(&lead)).await {
            warn!(lead_id = %lead.id, error = %err, "lead notification failed");
        }

        Ok(SubmissionReceipt {
            lead_id: lead.id,
            assigned_admin_id: lead.assigned_admin_id,
            status: lead.status,
        })
    }

    /// Leads visible to `viewer_id`. Representatives only see leads assigned
    /// to them regardless of the requested filter.
    pub async fn list_for_viewer(&self, viewer_id: &str, filter: LeadFilter) -> Result<Vec<Lead>> {
        let viewer = load_active_admin(self.admins.as_ref(), viewer_id).await?;
        let filter = if viewer.role.sees_all_leads() {
            filter
        } else {
            LeadFilter { assigned_admin_id: Some(viewer.id), ..filter }
        };
        self.leads.list(&filter).await
    }

    /// Get one lead, subject to the same visibility rule as listings.
    pub async fn get_for_viewer(&self, viewer_id: &str, lead_id: &str) -> Result<Lead> {
        let viewer = load_active_admin(self.admins.as_ref(), viewer_id).await?;
        let lead = self.require_lead(lead_id).await?;
        ensure_visible(&viewer.id, viewer.role.sees_all_leads(), &lead)?;
        Ok(lead)
    }

    /// Advance a lead one step along its lifecycle.
    ///
    /// `earnings_reflected` is only reachable through commission processing.
    pub async fn advance_status(
        &self,
        viewer_id: &str,
        lead_id: &str,
        target: LeadStatus,
    ) -> Result<Lead> {
        let viewer = load_active_admin(self.admins.as_ref(), viewer_id).await?;
        let lead = self.require_lead(lead_id).await?;
        ensure_visible(&viewer.id, viewer.role.sees_all_leads(), &lead)?;
        check_manual_transition(lead.status, target)?;

        let updated = self.leads.update_status(lead_id, lead.status, target).await?;
        info!(lead_id, from = %lead.status, to = %target, admin_id = %viewer.id, "lead status advanced");
        Ok(updated)
    }

    /// Hand a lead to another active admin. Managers only.
    pub async fn reassign(&self, viewer_id: &str, lead_id: &str, admin_id: &str) -> Result<Lead> {
        let viewer = load_active_admin(self.admins.as_ref(), viewer_id).await?;
        if !viewer.role.can_manage() {
            return Err(CoveraError::Forbidden("only managers can reassign leads".into()));
        }

        let target = self
            .admins
            .get_by_id(admin_id)
            .await?
            .ok_or_else(|| CoveraError::NotFound(format!("admin {admin_id}")))?;
        if !target.active {
            return Err(CoveraError::InvalidInput(format!(
                "admin {} is deactivated",
                target.display_code
            )));
        }

        let lead = self.require_lead(lead_id).await?;
        let updated = self.leads.reassign(&lead.id, &target.id).await?;
        info!(
            lead_id,
            from = ?lead.assigned_admin_id,
            to = %target.id,
            admin_id = %viewer.id,
            "lead reassigned"
        );
        Ok(updated)
    }

    async fn require_lead(&self, lead_id: &str) -> Result<Lead> {
        self.leads
            .get_by_id(lead_id)
            .await?
            .ok_or_else(|| CoveraError::NotFound(format!("lead {lead_id}")))
    }
}

fn ensure_visible(viewer_id: &str, sees_all: bool, lead: &Lead) -> Result<()> {
    if sees_all || lead.assigned_admin_id.as_deref() == Some(viewer_id) {
        Ok(())
    } else {
        Err(CoveraError::Forbidden(format!("lead {} is assigned to another admin", lead.id)))
    }
}

/// A console status change must move exactly one step forward and may not
/// enter `earnings_reflected`.
pub fn check_manual_transition(current: LeadStatus, target: LeadStatus) -> Result<()> {
    if target == LeadStatus::EarningsReflected {
        return Err(CoveraError::InvalidInput(
            "earnings are reflected by commission processing, not by a status change".into(),
        ));
    }
    if current.next() != Some(target) {
        return Err(CoveraError::InvalidInput(format!(
            "cannot move lead from {current} to {target}"
        )));
    }
    Ok(())
}
