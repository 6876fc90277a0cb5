//! Database implementations

pub mod admin_repository;
pub mod commission_ledger;
pub mod lead_repository;
pub mod manager;
pub mod partner_repository;
mod rows;

pub use admin_repository::*;
pub use commission_ledger::*;
pub use lead_repository::*;
pub use manager::*;
pub use partner_repository::*;
