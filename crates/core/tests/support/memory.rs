//! In-memory port implementations
//!
//! `MemoryStore` keeps admins, partners, leads and ledger rows behind one
//! mutex, which gives the same all-or-nothing behaviour as the SQLite
//! transactions in the infrastructure crate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use covera_core::assignment::next_admin;
use covera_core::earnings::ports::CommissionLedger;
use covera_core::{
    AdminRepository, LeadFilter, LeadNotification, LeadNotifier, LeadRepository,
    PartnerRepository,
};
use covera_domain::{
    Admin, Availability, CommissionReflection, CoveraError, Lead, LeadStatus, NewLead, Partner,
    Result as DomainResult, TransactionKind, WalletTransaction,
};

#[derive(Default)]
struct State {
    admins: Vec<Admin>,
    partners: Vec<Partner>,
    leads: Vec<Lead>,
    transactions: Vec<WalletTransaction>,
    last_assigned: Option<String>,
}

/// Shared in-memory store
#[derive(Default, Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admins(self, admins: Vec<Admin>) -> Self {
        self.state.lock().expect("lock").admins.extend(admins);
        self
    }

    pub fn with_partner(self, partner: Partner) -> Self {
        self.state.lock().expect("lock").partners.push(partner);
        self
    }

    /// Insert a lead directly, bypassing assignment.
    pub fn with_lead(self, lead: Lead) -> Self {
        self.state.lock().expect("lock").leads.push(lead);
        self
    }

    pub fn partner(&self, code: &str) -> Option<Partner> {
        let state = self.state.lock().expect("lock");
        state.partners.iter().find(|p| p.affiliate_code == code).cloned()
    }

    pub fn lead(&self, id: &str) -> Option<Lead> {
        let state = self.state.lock().expect("lock");
        state.leads.iter().find(|l| l.id == id).cloned()
    }

    pub fn transaction_count(&self) -> usize {
        self.state.lock().expect("lock").transactions.len()
    }
}

fn sorted_active(admins: &[Admin]) -> Vec<Admin> {
    let mut active: Vec<Admin> = admins.iter().filter(|a| a.active).cloned().collect();
    active.sort_by(|a, b| a.display_code.cmp(&b.display_code));
    active
}

#[async_trait]
impl LeadRepository for MemoryStore {
    async fn insert_with_round_robin(&self, lead: NewLead) -> DomainResult<Lead> {
        let mut state = self.state.lock().expect("lock");
        let pool = sorted_active(&state.admins);
        let assignee = next_admin(&pool, state.last_assigned.as_deref()).map(|a| a.id.clone());

        let stored = Lead {
            id: lead.id,
            product_type: lead.details.product_type(),
            details: lead.details,
            status: LeadStatus::Requested,
            contact: lead.contact,
            affiliate_code: lead.affiliate_code,
            assigned_admin_id: assignee.clone(),
            commission: None,
            total_premium: None,
            created_at: lead.created_at,
            updated_at: lead.created_at,
        };
        if assignee.is_some() {
            state.last_assigned = assignee;
        }
        state.leads.push(stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<Lead>> {
        Ok(self.lead(id))
    }

    async fn list(&self, filter: &LeadFilter) -> DomainResult<Vec<Lead>> {
        let state = self.state.lock().expect("lock");
        let mut leads: Vec<Lead> = state
            .leads
            .iter()
            .filter(|l| {
                filter.assigned_admin_id.as_ref().map_or(true, |id| {
                    l.assigned_admin_id.as_ref() == Some(id)
                }) && filter
                    .affiliate_code
                    .as_ref()
                    .map_or(true, |code| l.affiliate_code.as_ref() == Some(code))
                    && filter.status.map_or(true, |s| l.status == s)
            })
            .cloned()
            .collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    async fn update_status(
        &self,
        id: &str,
        from: LeadStatus,
        to: LeadStatus,
    ) -> DomainResult<Lead> {
        let mut state = self.state.lock().expect("lock");
        let lead = state
            .leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| CoveraError::NotFound(format!("lead {id}")))?;
        if lead.status != from {
            return Err(CoveraError::Conflict(format!("lead {id} changed concurrently")));
        }
        lead.status = to;
        Ok(lead.clone())
    }

    async fn reassign(&self, id: &str, admin_id: &str) -> DomainResult<Lead> {
        let mut state = self.state.lock().expect("lock");
        let lead = state
            .leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| CoveraError::NotFound(format!("lead {id}")))?;
        lead.assigned_admin_id = Some(admin_id.to_string());
        Ok(lead.clone())
    }
}

#[async_trait]
impl AdminRepository for MemoryStore {
    async fn create(&self, admin: Admin) -> DomainResult<Admin> {
        let mut state = self.state.lock().expect("lock");
        if state
            .admins
            .iter()
            .any(|a| a.email == admin.email || a.display_code == admin.display_code)
        {
            return Err(CoveraError::Conflict("admin already registered".into()));
        }
        state.admins.push(admin.clone());
        Ok(admin)
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<Admin>> {
        let state = self.state.lock().expect("lock");
        Ok(state.admins.iter().find(|a| a.id == id).cloned())
    }

    async fn list_all(&self) -> DomainResult<Vec<Admin>> {
        let state = self.state.lock().expect("lock");
        let mut admins = state.admins.clone();
        admins.sort_by(|a, b| a.display_code.cmp(&b.display_code));
        Ok(admins)
    }

    async fn set_availability(&self, id: &str, availability: Availability) -> DomainResult<Admin> {
        let mut state = self.state.lock().expect("lock");
        let admin = state
            .admins
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoveraError::NotFound(format!("admin {id}")))?;
        admin.availability = availability;
        Ok(admin.clone())
    }

    async fn set_active(&self, id: &str, active: bool) -> DomainResult<Admin> {
        let mut state = self.state.lock().expect("lock");
        let admin = state
            .admins
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoveraError::NotFound(format!("admin {id}")))?;
        admin.active = active;
        Ok(admin.clone())
    }
}

#[async_trait]
impl PartnerRepository for MemoryStore {
    async fn create(&self, partner: Partner) -> DomainResult<Partner> {
        let mut state = self.state.lock().expect("lock");
        if state.partners.iter().any(|p| p.affiliate_code == partner.affiliate_code) {
            return Err(CoveraError::Conflict("affiliate code already registered".into()));
        }
        state.partners.push(partner.clone());
        Ok(partner)
    }

    async fn get_by_code(&self, affiliate_code: &str) -> DomainResult<Option<Partner>> {
        Ok(self.partner(affiliate_code))
    }

    async fn list_transactions(&self, partner_id: &str) -> DomainResult<Vec<WalletTransaction>> {
        let state = self.state.lock().expect("lock");
        let mut rows: Vec<WalletTransaction> =
            state.transactions.iter().filter(|t| t.partner_id == partner_id).cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[async_trait]
impl CommissionLedger for MemoryStore {
    async fn reflect(&self, reflection: CommissionReflection) -> DomainResult<WalletTransaction> {
        let mut guard = self.state.lock().expect("lock");
        let state = &mut *guard;

        let partner_idx = state
            .partners
            .iter()
            .position(|p| p.affiliate_code == reflection.affiliate_code)
            .ok_or_else(|| CoveraError::NotFound(format!("partner {}", reflection.affiliate_code)))?;
        let lead = state
            .leads
            .iter_mut()
            .find(|l| l.id == reflection.lead_id)
            .ok_or_else(|| CoveraError::NotFound(format!("lead {}", reflection.lead_id)))?;
        if lead.commission.is_some() {
            return Err(CoveraError::Conflict("commission already reflected".into()));
        }

        let amount = reflection.breakdown.partner_earning;
        lead.commission = Some(amount);
        lead.total_premium = Some(reflection.breakdown.total_premium);
        lead.status = LeadStatus::EarningsReflected;
        lead.updated_at = reflection.reflected_at;

        let partner = &mut state.partners[partner_idx];
        partner.wallet_balance += amount;

        let tx = WalletTransaction {
            id: reflection.transaction_id,
            partner_id: partner.id.clone(),
            lead_id: reflection.lead_id,
            amount,
            kind: TransactionKind::Commission,
            description: format!("{} commission", reflection.breakdown.product_type),
            created_at: reflection.reflected_at,
        };
        state.transactions.push(tx.clone());
        Ok(tx)
    }
}

/// Notifier that records every notification, optionally failing each one
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<LeadNotification>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn sent(&self) -> Vec<LeadNotification> {
        self.sent.lock().expect("lock").clone()
    }
}

#[async_trait]
impl LeadNotifier for RecordingNotifier {
    async fn notify_new_lead(&self, notification: &LeadNotification) -> DomainResult<()> {
        self.sent.lock().expect("lock").push(notification.clone());
        if self.fail {
            return Err(CoveraError::Network("webhook unreachable".into()));
        }
        Ok(())
    }
}
