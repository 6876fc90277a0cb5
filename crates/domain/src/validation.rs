//! Field validators for inbound forms.
//!
//! Every validator returns `CoveraError::InvalidInput` naming the offending
//! field so the API layer can surface the message as-is.

use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    MAX_AFFILIATE_CODE_LENGTH, MAX_NAME_LENGTH, MAX_PHONE_DIGITS, MIN_AFFILIATE_CODE_LENGTH,
    MIN_PHONE_DIGITS,
};
use crate::{CoveraError, Result};

/// Dotted domain with alphanumeric-bounded labels and an alphabetic TLD.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("EMAIL_REGEX pattern is valid and well-formed")
});

static PHONE_CHARSET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9+ -]+$").expect("PHONE_CHARSET_REGEX pattern is valid and well-formed")
});

static AFFILIATE_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9-]+$").expect("AFFILIATE_CODE_REGEX pattern is valid and well-formed")
});

fn invalid(field: &str, reason: impl Display) -> CoveraError {
    CoveraError::InvalidInput(format!("{field}: {reason}"))
}

/// Reject empty or whitespace-only strings.
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(())
}

/// Inclusive range check for any ordered value.
pub fn require_range<T>(field: &str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(invalid(field, format!("must be between {min} and {max}, got {value}")));
    }
    Ok(())
}

/// Strictly positive, finite amount.
pub fn require_positive_amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, "must be a positive amount"));
    }
    Ok(())
}

/// Contact name: non-empty and bounded.
pub fn validate_name(name: &str) -> Result<()> {
    require_non_empty("name", name)?;
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(invalid("name", format!("must be at most {MAX_NAME_LENGTH} characters")));
    }
    Ok(())
}

/// Phone numbers accept digits, spaces, `+` and `-` only.
pub fn validate_phone(phone: &str) -> Result<()> {
    require_non_empty("phone", phone)?;
    if !PHONE_CHARSET_REGEX.is_match(phone) {
        return Err(invalid("phone", "may only contain digits, spaces, '+' and '-'"));
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(invalid(
            "phone",
            format!("must contain {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits"),
        ));
    }
    Ok(())
}

/// Email addresses: `local@label.label.tld`.
pub fn validate_email(email: &str) -> Result<()> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(invalid("email", "invalid email format"));
    }
    Ok(())
}

/// Affiliate codes: ASCII alphanumerics and `-`, bounded length.
pub fn validate_affiliate_code(code: &str) -> Result<()> {
    let len = code.chars().count();
    if !(MIN_AFFILIATE_CODE_LENGTH..=MAX_AFFILIATE_CODE_LENGTH).contains(&len) {
        return Err(invalid(
            "affiliate_code",
            format!(
                "must be {MIN_AFFILIATE_CODE_LENGTH} to {MAX_AFFILIATE_CODE_LENGTH} characters"
            ),
        ));
    }
    if !AFFILIATE_CODE_REGEX.is_match(code) {
        return Err(invalid("affiliate_code", "may only contain letters, digits and '-'"));
    }
    Ok(())
}
