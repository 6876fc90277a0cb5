//! Commission breakdown types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lead::ProductType;

/// Derived payout for one policy. Never persisted as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarningBreakdown {
    pub product_type: ProductType,
    pub total_premium: f64,
    pub commission_rate: f64,
    pub base_commission: f64,
    pub company_share: f64,
    pub partner_earning: f64,
}

/// Everything the store needs to reflect a commission in one unit of work
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionReflection {
    pub lead_id: String,
    pub affiliate_code: String,
    pub transaction_id: String,
    pub breakdown: EarningBreakdown,
    pub reflected_at: DateTime<Utc>,
}
