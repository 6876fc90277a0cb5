//! Lead intake and the admin-console lead workflow

pub mod ports;
pub mod service;

pub use service::{LeadService, SubmissionReceipt};
