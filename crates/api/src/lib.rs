//! # Covera API
//!
//! HTTP surface of the brokerage backend: lead intake, the admin console,
//! partner dashboards and commission processing.

pub mod context;
pub mod routes;
pub mod utils;

pub use context::AppContext;
pub use routes::router;
