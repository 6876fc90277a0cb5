//! Partner service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use covera_domain::{
    CoveraError, LeadStatus, NewPartner, Partner, ProductType, Result, WalletTransaction,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::ports::PartnerRepository;
use crate::leads::ports::{LeadFilter, LeadRepository};

/// Lead as shown to the partner who referred it. Customer contact details
/// stay on the console side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferredLead {
    pub id: String,
    pub product_type: ProductType,
    pub status: LeadStatus,
    pub commission: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Everything the partner dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerDashboard {
    pub partner: Partner,
    pub transactions: Vec<WalletTransaction>,
    pub referred_leads: Vec<ReferredLead>,
}

/// Partner use cases
pub struct PartnerService {
    partners: Arc<dyn PartnerRepository>,
    leads: Arc<dyn LeadRepository>,
}

impl PartnerService {
    /// Create a new partner service
    pub fn new(partners: Arc<dyn PartnerRepository>, leads: Arc<dyn LeadRepository>) -> Self {
        Self { partners, leads }
    }

    /// Register a partner with an empty wallet.
    pub async fn register(&self, request: NewPartner) -> Result<Partner> {
        request.validate()?;

        let partner = Partner {
            id: Uuid::now_v7().to_string(),
            affiliate_code: request.affiliate_code,
            name: request.name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            wallet_balance: 0.0,
            created_at: Utc::now(),
        };
        let partner = self.partners.create(partner).await?;

        info!(partner_id = %partner.id, affiliate_code = %partner.affiliate_code, "partner registered");
        Ok(partner)
    }

    /// Dashboard for the partner owning `affiliate_code`.
    pub async fn dashboard(&self, affiliate_code: &str) -> Result<PartnerDashboard> {
        let partner = self
            .partners
            .get_by_code(affiliate_code)
            .await?
            .ok_or_else(|| CoveraError::NotFound(format!("partner {affiliate_code}")))?;

        let transactions = self.partners.list_transactions(&partner.id).await?;
        let filter =
            LeadFilter { affiliate_code: Some(partner.affiliate_code.clone()), ..LeadFilter::default() };
        let referred_leads = self
            .leads
            .list(&filter)
            .await?
            .into_iter()
            .map(|lead| ReferredLead {
                id: lead.id,
                product_type: lead.product_type,
                status: lead.status,
                commission: lead.commission,
                created_at: lead.created_at,
            })
            .collect();

        Ok(PartnerDashboard { partner, transactions, referred_leads })
    }
}
