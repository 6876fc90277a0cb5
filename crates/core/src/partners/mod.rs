//! Partner registration and the referral dashboard

pub mod ports;
pub mod service;

pub use service::{PartnerDashboard, PartnerService, ReferredLead};
