//! Partner repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use covera_core::partners::ports::PartnerRepository as PartnerRepositoryPort;
use covera_domain::{CoveraError, Partner, Result as DomainResult, WalletTransaction};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::task;

use super::manager::DbManager;
use super::rows::{millis_column, parsed_column, to_millis};
use crate::errors::{map_join_error, map_sql_error};

const TRANSACTION_COLUMNS: &str = "id, partner_id, lead_id, amount, kind, description, created_at";

/// SQLite-backed implementation of `PartnerRepository`
pub struct SqlitePartnerRepository {
    db: Arc<DbManager>,
}

impl SqlitePartnerRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PartnerRepositoryPort for SqlitePartnerRepository {
    async fn create(&self, partner: Partner) -> DomainResult<Partner> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Partner> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO partners (id, affiliate_code, name, email, wallet_balance, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    partner.id,
                    partner.affiliate_code,
                    partner.name,
                    partner.email,
                    partner.wallet_balance,
                    to_millis(partner.created_at),
                ],
            )
            .map_err(|err| match map_sql_error(err) {
                CoveraError::Conflict(_) => {
                    CoveraError::Conflict("affiliate code already registered".into())
                }
                other => other,
            })?;
            find_partner_by_code(&conn, &partner.affiliate_code)?.ok_or_else(|| {
                CoveraError::Internal(format!("partner {} missing after insert", partner.id))
            })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_code(&self, affiliate_code: &str) -> DomainResult<Option<Partner>> {
        let db = Arc::clone(&self.db);
        let affiliate_code = affiliate_code.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Partner>> {
            let conn = db.get_connection()?;
            find_partner_by_code(&conn, &affiliate_code)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_transactions(&self, partner_id: &str) -> DomainResult<Vec<WalletTransaction>> {
        let db = Arc::clone(&self.db);
        let partner_id = partner_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<WalletTransaction>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(
                    &format!(
                        "SELECT {TRANSACTION_COLUMNS} FROM wallet_transactions
                         WHERE partner_id = ?1
                         ORDER BY created_at DESC, rowid DESC"
                    ),
                )
                .map_err(map_sql_error)?;
            let rows = stmt.query_map(params![partner_id], map_transaction_row).map_err(map_sql_error)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

pub(crate) fn find_partner_by_code(
    conn: &Connection,
    affiliate_code: &str,
) -> DomainResult<Option<Partner>> {
    conn.query_row(
        "SELECT id, affiliate_code, name, email, wallet_balance, created_at
         FROM partners WHERE affiliate_code = ?1",
        params![affiliate_code],
        map_partner_row,
    )
    .optional()
    .map_err(map_sql_error)
}

pub(crate) fn find_transaction(
    conn: &Connection,
    id: &str,
) -> DomainResult<Option<WalletTransaction>> {
    conn.query_row(
        &format!("SELECT {TRANSACTION_COLUMNS} FROM wallet_transactions WHERE id = ?1"),
        params![id],
        map_transaction_row,
    )
    .optional()
    .map_err(map_sql_error)
}

fn map_partner_row(row: &Row<'_>) -> rusqlite::Result<Partner> {
    Ok(Partner {
        id: row.get(0)?,
        affiliate_code: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        wallet_balance: row.get(4)?,
        created_at: millis_column(row, 5)?,
    })
}

fn map_transaction_row(row: &Row<'_>) -> rusqlite::Result<WalletTransaction> {
    Ok(WalletTransaction {
        id: row.get(0)?,
        partner_id: row.get(1)?,
        lead_id: row.get(2)?,
        amount: row.get(3)?,
        kind: parsed_column(row, 4)?,
        description: row.get(5)?,
        created_at: millis_column(row, 6)?,
    })
}
