//! New-lead notifications

pub mod ports;
