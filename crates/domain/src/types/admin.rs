//! Admin (internal staff) types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{require_non_empty, validate_email, validate_name};
use crate::{impl_domain_status_conversions, Result};

/// Console role of an admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Representative,
    AgencyAdmin,
    SuperAdmin,
}

impl_domain_status_conversions!(AdminRole {
    Representative => "representative",
    AgencyAdmin => "agency_admin",
    SuperAdmin => "super_admin",
});

impl AdminRole {
    /// Representatives only see their own leads.
    pub fn sees_all_leads(self) -> bool {
        !matches!(self, Self::Representative)
    }

    /// Reassignment and admin management.
    pub fn can_manage(self) -> bool {
        matches!(self, Self::AgencyAdmin | Self::SuperAdmin)
    }

    /// Finance operations (commission processing).
    pub fn can_process_commissions(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

/// Self-reported availability shown on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Active,
    Break,
    Lunch,
    Inactive,
}

impl_domain_status_conversions!(Availability {
    Active => "active",
    Break => "break",
    Lunch => "lunch",
    Inactive => "inactive",
});

/// Internal representative or manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    /// Stable code that fixes the round-robin order.
    pub display_code: String,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub availability: Availability,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin registration request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAdmin {
    pub display_code: String,
    pub name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: AdminRole,
}

fn default_role() -> AdminRole {
    AdminRole::Representative
}

impl NewAdmin {
    /// Validate registration fields.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("display_code", &self.display_code)?;
        validate_name(&self.name)?;
        validate_email(&self.email)
    }
}
