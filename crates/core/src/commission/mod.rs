//! Commission calculation
//!
//! Maps a policy premium to the company/partner split using a static rate
//! table. Pure: callers persist the result.

pub mod calculator;
pub mod rates;

pub use calculator::{format_amount, format_currency, CommissionCalculator};
pub use rates::CommissionRateTable;
