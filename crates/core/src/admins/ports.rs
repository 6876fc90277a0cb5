//! Port interfaces for admin profiles

use async_trait::async_trait;
use covera_domain::{Admin, Availability, Result};

/// Trait for admin persistence and retrieval
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Create an admin and return it as stored. Duplicate email or display
    /// code fails with `Conflict`.
    async fn create(&self, admin: Admin) -> Result<Admin>;

    /// Get admin by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Admin>>;

    /// Every admin, ordered by display code
    async fn list_all(&self) -> Result<Vec<Admin>>;

    /// Update availability status
    async fn set_availability(&self, id: &str, availability: Availability) -> Result<Admin>;

    /// Activate or deactivate an admin
    async fn set_active(&self, id: &str, active: bool) -> Result<Admin>;
}
