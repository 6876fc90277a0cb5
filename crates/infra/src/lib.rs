//! # Covera Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite repositories over an r2d2 pool
//! - The configuration loader
//! - New-lead notifiers (log and mail relay webhook)
//!
//! ## Architecture
//! - Implements traits defined in `covera-core`
//! - Contains all "impure" code (I/O, network)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod notifications;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
pub use http::*;
pub use notifications::*;
