//! Commission ledger implementation using SQLite
//!
//! Reflection is a single `IMMEDIATE` transaction. The lead update is guarded
//! by `commission IS NULL`, so a repeated or concurrent request for the same
//! lead changes zero rows and rolls back before the wallet is touched.

use std::sync::Arc;

use async_trait::async_trait;
use covera_core::earnings::ports::CommissionLedger;
use covera_core::format_amount;
use covera_domain::{
    CommissionReflection, CoveraError, EarningBreakdown, LeadStatus, Result as DomainResult, TransactionKind,
    WalletTransaction,
};
use rusqlite::{params, TransactionBehavior};
use tokio::task;

use super::lead_repository::find_lead;
use super::manager::DbManager;
use super::partner_repository::{find_partner_by_code, find_transaction};
use super::rows::to_millis;
use crate::errors::{map_join_error, map_sql_error};

/// SQLite-backed implementation of `CommissionLedger`
pub struct SqliteCommissionLedger {
    db: Arc<DbManager>,
}

impl SqliteCommissionLedger {
    /// Create a new ledger instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommissionLedger for SqliteCommissionLedger {
    async fn reflect(&self, reflection: CommissionReflection) -> DomainResult<WalletTransaction> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<WalletTransaction> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let partner = find_partner_by_code(&tx, &reflection.affiliate_code)?.ok_or_else(|| {
                CoveraError::NotFound(format!("partner {}", reflection.affiliate_code))
            })?;

            let breakdown = reflection.breakdown;
            let amount = breakdown.partner_earning;
            let reflected_at = to_millis(reflection.reflected_at);

            let changed = tx
                .execute(
                    "UPDATE leads
                     SET commission = ?1, total_premium = ?2, status = ?3, updated_at = ?4
                     WHERE id = ?5 AND commission IS NULL",
                    params![
                        amount,
                        breakdown.total_premium,
                        LeadStatus::EarningsReflected.as_str(),
                        reflected_at,
                        reflection.lead_id,
                    ],
                )
                .map_err(map_sql_error)?;
            if changed == 0 {
                // Dropping `tx` rolls back.
                if find_lead(&tx, &reflection.lead_id)?.is_none() {
                    return Err(CoveraError::NotFound(format!("lead {}", reflection.lead_id)));
                }
                return Err(CoveraError::Conflict(format!(
                    "commission for lead {} was already reflected",
                    reflection.lead_id
                )));
            }

            tx.execute(
                "UPDATE partners SET wallet_balance = wallet_balance + ?1 WHERE id = ?2",
                params![amount, partner.id],
            )
            .map_err(map_sql_error)?;

            let transaction = WalletTransaction {
                id: reflection.transaction_id,
                partner_id: partner.id,
                lead_id: reflection.lead_id,
                amount,
                kind: TransactionKind::Commission,
                description: commission_description(&breakdown),
                created_at: reflection.reflected_at,
            };
            tx.execute(
                "INSERT INTO wallet_transactions (id, partner_id, lead_id, amount, kind, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    transaction.id,
                    transaction.partner_id,
                    transaction.lead_id,
                    transaction.amount,
                    transaction.kind.as_str(),
                    transaction.description,
                    reflected_at,
                ],
            )
            .map_err(map_sql_error)?;

            let transaction = find_transaction(&tx, &transaction.id)?.ok_or_else(|| {
                CoveraError::Internal(format!("transaction {} missing after insert", transaction.id))
            })?;
            tx.commit().map_err(map_sql_error)?;
            Ok(transaction)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn commission_description(breakdown: &EarningBreakdown) -> String {
    format!(
        "{} commission on {} premium",
        breakdown.product_type,
        format_amount(breakdown.total_premium)
    )
}
