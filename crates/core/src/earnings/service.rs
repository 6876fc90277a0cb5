//! Earnings service
//!
//! Runs the commission calculator for a converted lead and hands the result to
//! the [`CommissionLedger`] for the wallet credit and ledger row.

use std::sync::Arc;

use chrono::Utc;
use covera_domain::{
    default_currency_symbol, CommissionReflection, CoveraError, EarningBreakdown, LeadStatus, Result, WalletTransaction,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::ports::CommissionLedger;
use crate::admins::ports::AdminRepository;
use crate::admins::service::load_active_admin;
use crate::commission::{format_currency, CommissionCalculator};
use crate::leads::ports::LeadRepository;

/// Body of the commission processing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRequest {
    pub lead_id: String,
    /// Product name; must be a key of the rate table.
    pub product_type: String,
    pub total_premium: f64,
}

/// Breakdown plus the ledger row that was written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionOutcome {
    pub breakdown: EarningBreakdown,
    pub transaction: WalletTransaction,
    /// `partner_earning` rendered for display.
    pub partner_earning_display: String,
}

/// Commission use cases
pub struct EarningsService {
    calculator: CommissionCalculator,
    leads: Arc<dyn LeadRepository>,
    admins: Arc<dyn AdminRepository>,
    ledger: Arc<dyn CommissionLedger>,
    currency_symbol: String,
}

impl EarningsService {
    /// Create a new earnings service
    pub fn new(
        calculator: CommissionCalculator,
        leads: Arc<dyn LeadRepository>,
        admins: Arc<dyn AdminRepository>,
        ledger: Arc<dyn CommissionLedger>,
    ) -> Self {
        Self { calculator, leads, admins, ledger, currency_symbol: default_currency_symbol() }
    }

    /// Render display amounts with `symbol`.
    #[must_use]
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// `amount` as shown to partners.
    pub fn display_amount(&self, amount: f64) -> String {
        format_currency(amount, &self.currency_symbol)
    }

    /// Calculate without writing anything.
    pub fn preview(&self, product_type: &str, total_premium: f64) -> Result<EarningBreakdown> {
        self.calculator.calculate_named(product_type, total_premium)
    }

    /// Process the commission for a converted, referred lead. Super admins only.
    pub async fn process(
        &self,
        caller_id: &str,
        request: CommissionRequest,
    ) -> Result<CommissionOutcome> {
        let caller = load_active_admin(self.admins.as_ref(), caller_id).await?;
        if !caller.role.can_process_commissions() {
            return Err(CoveraError::Forbidden("only finance can process commissions".into()));
        }

        // Rejects unknown products and bad premiums before touching storage.
        let breakdown =
            self.calculator.calculate_named(&request.product_type, request.total_premium)?;

        let lead = self
            .leads
            .get_by_id(&request.lead_id)
            .await?
            .ok_or_else(|| CoveraError::NotFound(format!("lead {}", request.lead_id)))?;

        if lead.product_type != breakdown.product_type {
            return Err(CoveraError::InvalidInput(format!(
                "lead {} is a {} request, not {}",
                lead.id, lead.product_type, breakdown.product_type
            )));
        }
        let affiliate_code = lead.affiliate_code.clone().ok_or_else(|| {
            CoveraError::InvalidInput(format!("lead {} has no referring partner", lead.id))
        })?;
        if lead.commission_reflected() {
            return Err(CoveraError::Conflict(format!(
                "commission for lead {} was already reflected",
                lead.id
            )));
        }
        if lead.status != LeadStatus::Converted {
            return Err(CoveraError::InvalidInput(format!(
                "lead {} must be converted before its commission is reflected (status: {})",
                lead.id, lead.status
            )));
        }

        let transaction = self
            .ledger
            .reflect(CommissionReflection {
                lead_id: lead.id.clone(),
                affiliate_code: affiliate_code.clone(),
                transaction_id: Uuid::now_v7().to_string(),
                breakdown,
                reflected_at: Utc::now(),
            })
            .await?;

        let partner_earning_display = self.display_amount(breakdown.partner_earning);
        info!(
            lead_id = %lead.id,
            affiliate_code = %affiliate_code,
            product_type = %breakdown.product_type,
            total_premium = breakdown.total_premium,
            base_commission = breakdown.base_commission,
            partner_earning = breakdown.partner_earning,
            admin_id = %caller.id,
            "commission reflected"
        );

        Ok(CommissionOutcome { breakdown, transaction, partner_earning_display })
    }
}
