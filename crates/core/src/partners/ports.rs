//! Port interfaces for partner profiles and wallet ledgers

use async_trait::async_trait;
use covera_domain::{Partner, Result, WalletTransaction};

/// Trait for partner persistence and retrieval
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    /// Create a partner and return it as stored. Duplicate affiliate code
    /// fails with `Conflict`.
    async fn create(&self, partner: Partner) -> Result<Partner>;

    /// Get partner by affiliate code
    async fn get_by_code(&self, affiliate_code: &str) -> Result<Option<Partner>>;

    /// Ledger rows for a partner, newest first
    async fn list_transactions(&self, partner_id: &str) -> Result<Vec<WalletTransaction>>;
}
