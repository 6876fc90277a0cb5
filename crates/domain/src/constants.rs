//! Application constants
//!
//! Commission split ratios and field limits shared by every layer.

/// Share of the base commission kept by the company.
pub const COMPANY_SHARE_RATIO: f64 = 0.30;

/// Share of the base commission set aside for the referral side.
pub const REFERRAL_POOL_RATIO: f64 = 0.70;

/// The referral pool is halved; the partner earns one half.
pub const REFERRAL_POOL_SPLIT: f64 = 2.0;

/// Tolerance used when comparing derived currency amounts.
pub const AMOUNT_EPSILON: f64 = 1e-6;

// Contact field limits
pub const MAX_NAME_LENGTH: usize = 100;
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 20;

// Affiliate codes
pub const MIN_AFFILIATE_CODE_LENGTH: usize = 4;
pub const MAX_AFFILIATE_CODE_LENGTH: usize = 32;

// Product field limits
pub const MIN_VEHICLE_YEAR: i32 = 1950;
pub const MIN_DRIVER_AGE: u32 = 18;
pub const MAX_DRIVER_AGE: u32 = 100;
pub const MAX_TRAVELERS: u32 = 20;
