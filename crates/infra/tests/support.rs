//! Shared fixtures for infra integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use covera_domain::{
    Admin, AdminRole, AutoDetails, Availability, ContactInfo, LeadDetails, NewLead, Partner,
};
use covera_infra::database::DbManager;
use tempfile::TempDir;
use uuid::Uuid;

/// Temporary migrated database kept alive for the duration of a test.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let manager =
            DbManager::new(temp_dir.path().join("covera.db"), 4).expect("db manager should be created");
        manager.run_migrations().expect("migrations should run");
        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

pub fn admin(id: &str, display_code: &str, role: AdminRole) -> Admin {
    Admin {
        id: id.to_string(),
        display_code: display_code.to_string(),
        name: format!("Admin {display_code}"),
        email: format!("{}@covera.example", display_code.to_lowercase()),
        role,
        availability: Availability::Active,
        active: true,
        created_at: Utc::now(),
    }
}

pub fn partner(id: &str, code: &str) -> Partner {
    Partner {
        id: id.to_string(),
        affiliate_code: code.to_string(),
        name: format!("Partner {code}"),
        email: format!("{}@partners.example", code.to_lowercase()),
        wallet_balance: 0.0,
        created_at: Utc::now(),
    }
}

/// Auto lead created `offset_ms` milliseconds after a fixed base instant
pub fn new_lead(affiliate_code: Option<&str>, offset_ms: i64) -> NewLead {
    NewLead {
        id: Uuid::now_v7().to_string(),
        contact: ContactInfo {
            name: "Casey Nguyen".to_string(),
            phone: "555-876-5432".to_string(),
            email: None,
        },
        affiliate_code: affiliate_code.map(str::to_string),
        details: LeadDetails::Auto(AutoDetails {
            vehicle_model: "Accord".to_string(),
            vehicle_year: 2020,
            driver_age: 45,
        }),
        created_at: Utc::now() - Duration::hours(1) + Duration::milliseconds(offset_ms),
    }
}
