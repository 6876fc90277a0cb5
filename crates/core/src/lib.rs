//! # Covera Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The commission calculator and its rate table
//! - The round-robin assignor
//! - Port/adapter interfaces (traits) for persistence and notification
//! - Use cases for leads, admins, partners and earnings
//!
//! ## Architecture Principles
//! - Only depends on `covera-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod admins;
pub mod assignment;
pub mod commission;
pub mod earnings;
pub mod leads;
pub mod notifications;
pub mod partners;

// Re-export specific items to avoid ambiguity
pub use admins::ports::AdminRepository;
pub use admins::AdminService;
pub use assignment::{next_admin, next_in_rotation};
pub use commission::{format_amount, format_currency, CommissionCalculator, CommissionRateTable};
pub use earnings::ports::CommissionLedger;
pub use earnings::{CommissionOutcome, CommissionRequest, EarningsService};
pub use leads::ports::{LeadFilter, LeadRepository};
pub use leads::{LeadService, SubmissionReceipt};
pub use notifications::ports::{LeadNotification, LeadNotifier};
pub use partners::ports::PartnerRepository;
pub use partners::{PartnerDashboard, PartnerService, ReferredLead};
