//! Port interfaces for lead persistence

use async_trait::async_trait;
use covera_domain::{Lead, LeadStatus, NewLead, Result};
use serde::Deserialize;

/// Optional filters for lead listings. Empty filter lists everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LeadFilter {
    pub assigned_admin_id: Option<String>,
    pub affiliate_code: Option<String>,
    pub status: Option<LeadStatus>,
}

/// Trait for lead persistence and retrieval
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Insert a lead and assign it to the next active admin in rotation.
    ///
    /// Reading the previous assignee, choosing the next one with
    /// [`crate::assignment::next_admin`] and inserting the lead happen as one
    /// atomic unit, so concurrent submissions never share a slot. With no
    /// active admins the lead is stored unassigned.
    async fn insert_with_round_robin(&self, lead: NewLead) -> Result<Lead>;

    /// Get a lead by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Lead>>;

    /// List leads matching `filter`, newest first
    async fn list(&self, filter: &LeadFilter) -> Result<Vec<Lead>>;

    /// Move a lead from `from` to `to`.
    ///
    /// Fails with `Conflict` if the stored status is no longer `from`.
    async fn update_status(&self, id: &str, from: LeadStatus, to: LeadStatus) -> Result<Lead>;

    /// Point the lead at a different admin
    async fn reassign(&self, id: &str, admin_id: &str) -> Result<Lead>;
}
