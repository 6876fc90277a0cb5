//! Port for reflecting commissions into partner wallets

use async_trait::async_trait;
use covera_domain::{CommissionReflection, Result, WalletTransaction};

/// Atomic commission write
#[async_trait]
pub trait CommissionLedger: Send + Sync {
    /// In a single unit of work:
    /// - record the partner earning on the lead, only if none is recorded yet
    ///   (otherwise `Conflict`), set its premium and move it to
    ///   `earnings_reflected`;
    /// - credit the partner wallet;
    /// - append the ledger transaction.
    ///
    /// Nothing is written when any step fails.
    async fn reflect(&self, reflection: CommissionReflection) -> Result<WalletTransaction>;
}
