//! Lead repository implementation using SQLite
//!
//! Round-robin assignment runs inside an `IMMEDIATE` transaction: the write
//! lock is taken before the previous assignee is read, so two concurrent
//! submissions can never pick the same rotation slot.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use covera_core::assignment::next_admin;
use covera_core::leads::ports::{LeadFilter, LeadRepository as LeadRepositoryPort};
use covera_domain::{ContactInfo, CoveraError, Lead, LeadStatus, NewLead, Result as DomainResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};
use tokio::task;
use tracing::debug;

use super::admin_repository::query_admins;
use super::manager::DbManager;
use super::rows::{json_column, millis_column, parsed_column, to_millis};
use crate::errors::{map_join_error, map_sql_error};

pub(crate) const LEAD_COLUMNS: &str = "id, product_type, details_json, status, customer_name, \
     customer_phone, customer_email, affiliate_code, assigned_admin_id, commission, \
     total_premium, created_at, updated_at";

/// SQLite-backed implementation of `LeadRepository`
pub struct SqliteLeadRepository {
    db: Arc<DbManager>,
}

impl SqliteLeadRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeadRepositoryPort for SqliteLeadRepository {
    async fn insert_with_round_robin(&self, lead: NewLead) -> DomainResult<Lead> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Lead> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let pool = query_admins(&tx, true)?;
            let last_assigned = last_assigned_admin(&tx)?;
            let assignee = next_admin(&pool, last_assigned.as_deref()).map(|a| a.id.clone());
            debug!(
                pool_size = pool.len(),
                last_assigned = ?last_assigned,
                assignee = ?assignee,
                "round-robin pick"
            );

            let details_json = serde_json::to_string(&lead.details)
                .map_err(|e| CoveraError::Internal(format!("cannot encode lead details: {e}")))?;
            let stored = Lead {
                id: lead.id,
                product_type: lead.details.product_type(),
                details: lead.details,
                status: LeadStatus::Requested,
                contact: lead.contact,
                affiliate_code: lead.affiliate_code,
                assigned_admin_id: assignee,
                commission: None,
                total_premium: None,
                created_at: lead.created_at,
                updated_at: lead.created_at,
            };

            tx.execute(
                "INSERT INTO leads (id, product_type, details_json, status, customer_name,
                                    customer_phone, customer_email, affiliate_code,
                                    assigned_admin_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    stored.id,
                    stored.product_type.as_str(),
                    details_json,
                    stored.status.as_str(),
                    stored.contact.name,
                    stored.contact.phone,
                    stored.contact.email,
                    stored.affiliate_code,
                    stored.assigned_admin_id,
                    to_millis(stored.created_at),
                    to_millis(stored.updated_at),
                ],
            )
            .map_err(map_sql_error)?;

            // Re-read so callers see the stored (millisecond) timestamps.
            let stored = find_lead(&tx, &stored.id)?.ok_or_else(|| {
                CoveraError::Internal(format!("lead {} missing after insert", stored.id))
            })?;
            tx.commit().map_err(map_sql_error)?;
            Ok(stored)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<Lead>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Lead>> {
            let conn = db.get_connection()?;
            find_lead(&conn, &id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self, filter: &LeadFilter) -> DomainResult<Vec<Lead>> {
        let db = Arc::clone(&self.db);
        let filter = filter.clone();

        task::spawn_blocking(move || -> DomainResult<Vec<Lead>> {
            let conn = db.get_connection()?;

            let mut clauses = Vec::new();
            let mut values = Vec::new();
            if let Some(admin_id) = filter.assigned_admin_id {
                values.push(admin_id);
                clauses.push(format!("assigned_admin_id = ?{}", values.len()));
            }
            if let Some(code) = filter.affiliate_code {
                values.push(code);
                clauses.push(format!("affiliate_code = ?{}", values.len()));
            }
            if let Some(status) = filter.status {
                values.push(status.as_str().to_string());
                clauses.push(format!("status = ?{}", values.len()));
            }

            let where_clause =
                if clauses.is_empty() { String::new() } else { format!("WHERE {}", clauses.join(" AND ")) };
            let sql = format!(
                "SELECT {LEAD_COLUMNS} FROM leads {where_clause} ORDER BY created_at DESC, rowid DESC"
            );

            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let rows = stmt.query_map(params_from_iter(values), map_lead_row).map_err(map_sql_error)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update_status(&self, id: &str, from: LeadStatus, to: LeadStatus) -> DomainResult<Lead> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Lead> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE leads SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
                    params![to.as_str(), to_millis(Utc::now()), id, from.as_str()],
                )
                .map_err(map_sql_error)?;

            let lead = find_lead(&conn, &id)?
                .ok_or_else(|| CoveraError::NotFound(format!("lead {id}")))?;
            if changed == 0 {
                return Err(CoveraError::Conflict(format!(
                    "lead {id} is {} now, expected {from}",
                    lead.status
                )));
            }
            Ok(lead)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn reassign(&self, id: &str, admin_id: &str) -> DomainResult<Lead> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        let admin_id = admin_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Lead> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE leads SET assigned_admin_id = ?1, updated_at = ?2 WHERE id = ?3",
                    params![admin_id, to_millis(Utc::now()), id],
                )
                .map_err(map_sql_error)?;
            if changed == 0 {
                return Err(CoveraError::NotFound(format!("lead {id}")));
            }
            find_lead(&conn, &id)?.ok_or_else(|| CoveraError::NotFound(format!("lead {id}")))
        })
        .await
        .map_err(map_join_error)?
    }
}

/// Assignee of the most recently inserted assigned lead. Insertion order
/// (rowid) rather than `created_at`, which is stamped before the lock is held.
fn last_assigned_admin(conn: &Connection) -> DomainResult<Option<String>> {
    conn.query_row(
        "SELECT assigned_admin_id FROM leads
         WHERE assigned_admin_id IS NOT NULL
         ORDER BY rowid DESC
         LIMIT 1",
        [],
        |row| row.get(0),
    )
    .optional()
    .map_err(map_sql_error)
}

pub(crate) fn find_lead(conn: &Connection, id: &str) -> DomainResult<Option<Lead>> {
    conn.query_row(
        &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1"),
        params![id],
        map_lead_row,
    )
    .optional()
    .map_err(map_sql_error)
}

fn map_lead_row(row: &Row<'_>) -> rusqlite::Result<Lead> {
    Ok(Lead {
        id: row.get(0)?,
        product_type: parsed_column(row, 1)?,
        details: json_column(row, 2)?,
        status: parsed_column(row, 3)?,
        contact: ContactInfo {
            name: row.get(4)?,
            phone: row.get(5)?,
            email: row.get(6)?,
        },
        affiliate_code: row.get(7)?,
        assigned_admin_id: row.get(8)?,
        commission: row.get(9)?,
        total_premium: row.get(10)?,
        created_at: millis_column(row, 11)?,
        updated_at: millis_column(row, 12)?,
    })
}
