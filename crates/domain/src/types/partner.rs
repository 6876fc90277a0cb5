//! Partner (affiliate) types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{validate_affiliate_code, validate_email, validate_name};
use crate::{impl_domain_status_conversions, Result};

/// Referring partner with a commission wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub affiliate_code: String,
    pub name: String,
    pub email: String,
    pub wallet_balance: f64,
    pub created_at: DateTime<Utc>,
}

/// Partner registration request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPartner {
    pub affiliate_code: String,
    pub name: String,
    pub email: String,
}

impl NewPartner {
    /// Validate registration fields.
    pub fn validate(&self) -> Result<()> {
        validate_affiliate_code(&self.affiliate_code)?;
        validate_name(&self.name)?;
        validate_email(&self.email)
    }
}

/// Ledger entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Commission,
}

impl_domain_status_conversions!(TransactionKind {
    Commission => "commission",
});

/// Append-only wallet ledger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub id: String,
    pub partner_id: String,
    pub lead_id: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
