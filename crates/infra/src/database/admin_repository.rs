//! Admin repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use covera_core::admins::ports::AdminRepository as AdminRepositoryPort;
use covera_domain::{Admin, Availability, CoveraError, Result as DomainResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::task;

use super::manager::DbManager;
use super::rows::{millis_column, parsed_column, to_millis};
use crate::errors::{map_join_error, map_sql_error};

const ADMIN_COLUMNS: &str =
    "id, display_code, name, email, role, availability, active, created_at";

/// SQLite-backed implementation of `AdminRepository`
pub struct SqliteAdminRepository {
    db: Arc<DbManager>,
}

impl SqliteAdminRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepositoryPort for SqliteAdminRepository {
    async fn create(&self, admin: Admin) -> DomainResult<Admin> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Admin> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO admins (id, display_code, name, email, role, availability, active, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    admin.id,
                    admin.display_code,
                    admin.name,
                    admin.email,
                    admin.role.as_str(),
                    admin.availability.as_str(),
                    admin.active,
                    to_millis(admin.created_at),
                ],
            )
            .map_err(|err| match map_sql_error(err) {
                CoveraError::Conflict(_) => CoveraError::Conflict("admin already registered".into()),
                other => other,
            })?;
            find_admin(&conn, &admin.id)?
                .ok_or_else(|| CoveraError::Internal(format!("admin {} missing after insert", admin.id)))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<Admin>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Admin>> {
            let conn = db.get_connection()?;
            find_admin(&conn, &id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_all(&self) -> DomainResult<Vec<Admin>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Admin>> {
            let conn = db.get_connection()?;
            query_admins(&conn, false)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn set_availability(&self, id: &str, availability: Availability) -> DomainResult<Admin> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Admin> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE admins SET availability = ?1 WHERE id = ?2",
                    params![availability.as_str(), id],
                )
                .map_err(map_sql_error)?;
            reload_after_update(&conn, &id, changed)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn set_active(&self, id: &str, active: bool) -> DomainResult<Admin> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Admin> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute("UPDATE admins SET active = ?1 WHERE id = ?2", params![active, id])
                .map_err(map_sql_error)?;
            reload_after_update(&conn, &id, changed)
        })
        .await
        .map_err(map_join_error)?
    }
}

/// Admins ordered by display code; `active_only` gives the round-robin pool.
pub(crate) fn query_admins(conn: &Connection, active_only: bool) -> DomainResult<Vec<Admin>> {
    let sql = if active_only {
        format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE active = 1 ORDER BY display_code, id")
    } else {
        format!("SELECT {ADMIN_COLUMNS} FROM admins ORDER BY display_code, id")
    };
    let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
    let rows = stmt.query_map([], map_admin_row).map_err(map_sql_error)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(map_sql_error)
}

fn find_admin(conn: &Connection, id: &str) -> DomainResult<Option<Admin>> {
    conn.query_row(
        &format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = ?1"),
        params![id],
        map_admin_row,
    )
    .optional()
    .map_err(map_sql_error)
}

fn reload_after_update(conn: &Connection, id: &str, changed: usize) -> DomainResult<Admin> {
    if changed == 0 {
        return Err(CoveraError::NotFound(format!("admin {id}")));
    }
    find_admin(conn, id)?.ok_or_else(|| CoveraError::NotFound(format!("admin {id}")))
}

fn map_admin_row(row: &Row<'_>) -> rusqlite::Result<Admin> {
    Ok(Admin {
        id: row.get(0)?,
        display_code: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        role: parsed_column(row, 4)?,
        availability: parsed_column(row, 5)?,
        active: row.get(6)?,
        created_at: millis_column(row, 7)?,
    })
}
