//! # Covera Domain
//!
//! Business domain types for the Covera brokerage backend.
//!
//! This crate contains:
//! - Lead, admin and partner records
//! - Product-specific lead details as a tagged union
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Commission constants and field validation
//!
//! ## Architecture
//! - No dependencies on other Covera crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
