//! Admin service

use std::sync::Arc;

use chrono::Utc;
use covera_domain::{Admin, AdminRole, Availability, CoveraError, NewAdmin, Result};
use tracing::info;
use uuid::Uuid;

use super::ports::AdminRepository;

/// Resolve the calling admin and make sure they may use the console.
///
/// Unknown ids fail with `Auth`, deactivated admins with `Forbidden`.
pub async fn load_active_admin(admins: &dyn AdminRepository, id: &str) -> Result<Admin> {
    let admin = admins
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoveraError::Auth(format!("unknown admin: {id}")))?;
    if !admin.active {
        return Err(CoveraError::Forbidden(format!("admin {} is deactivated", admin.display_code)));
    }
    Ok(admin)
}

/// Admin management use cases
pub struct AdminService {
    admins: Arc<dyn AdminRepository>,
}

impl AdminService {
    /// Create a new admin service
    pub fn new(admins: Arc<dyn AdminRepository>) -> Self {
        Self { admins }
    }

    /// Register a new admin.
    ///
    /// The very first admin may register without a caller (bootstrap). After
    /// that the caller must be an agency or super admin, and only a super
    /// admin may create another super admin.
    pub async fn register(&self, caller_id: Option<&str>, request: NewAdmin) -> Result<Admin> {
        request.validate()?;

        let bootstrap = self.admins.list_all().await?.is_empty();
        if !bootstrap {
            let caller_id = caller_id
                .ok_or_else(|| CoveraError::Auth("admin registration requires a caller".into()))?;
            let caller = load_active_admin(self.admins.as_ref(), caller_id).await?;
            if !caller.role.can_manage() {
                return Err(CoveraError::Forbidden("only managers can register admins".into()));
            }
            if request.role == AdminRole::SuperAdmin && caller.role != AdminRole::SuperAdmin {
                return Err(CoveraError::Forbidden(
                    "only a super admin can register another super admin".into(),
                ));
            }
        }

        let admin = Admin {
            id: Uuid::now_v7().to_string(),
            display_code: request.display_code.trim().to_string(),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            role: request.role,
            availability: Availability::Active,
            active: true,
            created_at: Utc::now(),
        };

        let admin = self.admins.create(admin).await?;
        info!(admin_id = %admin.id, display_code = %admin.display_code, role = %admin.role, bootstrap, "admin registered");
        Ok(admin)
    }

    /// List every admin. Managers only.
    pub async fn list(&self, caller_id: &str) -> Result<Vec<Admin>> {
        let caller = load_active_admin(self.admins.as_ref(), caller_id).await?;
        if !caller.role.can_manage() {
            return Err(CoveraError::Forbidden("only managers can list admins".into()));
        }
        self.admins.list_all().await
    }

    /// Change availability. Admins may change their own; managers anyone's.
    pub async fn set_availability(
        &self,
        caller_id: &str,
        admin_id: &str,
        availability: Availability,
    ) -> Result<Admin> {
        let caller = load_active_admin(self.admins.as_ref(), caller_id).await?;
        if caller.id != admin_id && !caller.role.can_manage() {
            return Err(CoveraError::Forbidden(
                "representatives can only change their own availability".into(),
            ));
        }
        let admin = self.admins.set_availability(admin_id, availability).await?;
        info!(admin_id, %availability, "availability updated");
        Ok(admin)
    }

    /// Activate or deactivate an admin. Managers only; nobody deactivates
    /// themselves.
    pub async fn set_active(&self, caller_id: &str, admin_id: &str, active: bool) -> Result<Admin> {
        let caller = load_active_admin(self.admins.as_ref(), caller_id).await?;
        if !caller.role.can_manage() {
            return Err(CoveraError::Forbidden("only managers can change admin status".into()));
        }
        if caller.id == admin_id && !active {
            return Err(CoveraError::InvalidInput("admins cannot deactivate themselves".into()));
        }
        let admin = self.admins.set_active(admin_id, active).await?;
        info!(admin_id, active, "admin activation changed");
        Ok(admin)
    }
}
