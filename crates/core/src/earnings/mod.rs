//! Commission processing: calculator plus the atomic wallet/ledger write

pub mod ports;
pub mod service;

pub use service::{CommissionOutcome, CommissionRequest, EarningsService};
