//! Domain types and models

pub mod admin;
pub mod commission;
pub mod lead;
pub mod partner;

pub use admin::{Admin, AdminRole, Availability, NewAdmin};
pub use commission::{CommissionReflection, EarningBreakdown};
pub use lead::{
    AutoDetails, ContactInfo, HealthDetails, Lead, LeadDetails, LeadStatus, LeadSubmission,
    LifeDetails, NewLead, ProductType, PropertyDetails, TravelDetails,
};
pub use partner::{NewPartner, Partner, TransactionKind, WalletTransaction};
