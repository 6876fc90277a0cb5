//! Admin registration, availability and console authorization

pub mod ports;
pub mod service;

pub use service::{load_active_admin, AdminService};
