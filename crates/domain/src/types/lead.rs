//! Lead types
//!
//! A lead is a customer's insurance quote request. Product-specific fields
//! live in [`LeadDetails`], a union tagged by `product_type`.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{MAX_DRIVER_AGE, MAX_TRAVELERS, MIN_DRIVER_AGE, MIN_VEHICLE_YEAR};
use crate::validation::{
    require_non_empty, require_positive_amount, require_range, validate_affiliate_code,
    validate_email, validate_name, validate_phone,
};
use crate::{impl_domain_status_conversions, CoveraError, Result};

/* -------------------------------------------------------------------------- */
/* Product types */
/* -------------------------------------------------------------------------- */

/// Insurance products offered through the lead forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Auto,
    Health,
    Life,
    Property,
    Travel,
}

impl_domain_status_conversions!(ProductType {
    Auto => "auto",
    Health => "health",
    Life => "life",
    Property => "property",
    Travel => "travel",
});

impl ProductType {
    /// Every product, in form order.
    pub const ALL: [Self; 5] = [Self::Auto, Self::Health, Self::Life, Self::Property, Self::Travel];
}

/* -------------------------------------------------------------------------- */
/* Lead lifecycle */
/* -------------------------------------------------------------------------- */

/// Lifecycle status of a lead. Ordered; a lead only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Requested,
    Offered,
    PaymentInProgress,
    Converted,
    EarningsReflected,
}

impl_domain_status_conversions!(LeadStatus {
    Requested => "requested",
    Offered => "offered",
    PaymentInProgress => "payment_in_progress",
    Converted => "converted",
    EarningsReflected => "earnings_reflected",
});

impl LeadStatus {
    /// The status directly after this one, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Requested => Some(Self::Offered),
            Self::Offered => Some(Self::PaymentInProgress),
            Self::PaymentInProgress => Some(Self::Converted),
            Self::Converted => Some(Self::EarningsReflected),
            Self::EarningsReflected => None,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Product details */
/* -------------------------------------------------------------------------- */

/// Auto insurance request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoDetails {
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub driver_age: u32,
}

/// Health insurance request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDetails {
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub pre_existing_conditions: bool,
    pub plan_tier: String,
}

/// Life insurance request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeDetails {
    pub birth_date: NaiveDate,
    pub coverage_amount: f64,
    #[serde(default)]
    pub smoker: bool,
}

/// Property insurance request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub address: String,
    pub property_type: String,
    pub building_value: f64,
}

/// Travel insurance request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelDetails {
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub travelers: u32,
}

/// Product-specific lead fields, tagged by `product_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "product_type", rename_all = "snake_case")]
pub enum LeadDetails {
    Auto(AutoDetails),
    Health(HealthDetails),
    Life(LifeDetails),
    Property(PropertyDetails),
    Travel(TravelDetails),
}

impl LeadDetails {
    /// Product this request is for.
    pub fn product_type(&self) -> ProductType {
        match self {
            Self::Auto(_) => ProductType::Auto,
            Self::Health(_) => ProductType::Health,
            Self::Life(_) => ProductType::Life,
            Self::Property(_) => ProductType::Property,
            Self::Travel(_) => ProductType::Travel,
        }
    }

    /// Validate the product fields. `today` bounds birth and vehicle dates.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        match self {
            Self::Auto(d) => {
                require_non_empty("vehicle_model", &d.vehicle_model)?;
                require_range("vehicle_year", d.vehicle_year, MIN_VEHICLE_YEAR, today.year() + 1)?;
                require_range("driver_age", d.driver_age, MIN_DRIVER_AGE, MAX_DRIVER_AGE)
            }
            Self::Health(d) => {
                require_past_date("birth_date", d.birth_date, today)?;
                require_non_empty("plan_tier", &d.plan_tier)
            }
            Self::Life(d) => {
                require_past_date("birth_date", d.birth_date, today)?;
                require_positive_amount("coverage_amount", d.coverage_amount)
            }
            Self::Property(d) => {
                require_non_empty("address", &d.address)?;
                require_non_empty("property_type", &d.property_type)?;
                require_positive_amount("building_value", d.building_value)
            }
            Self::Travel(d) => {
                require_non_empty("destination", &d.destination)?;
                if d.return_date < d.departure_date {
                    return Err(CoveraError::InvalidInput(
                        "return_date: must not be before departure_date".into(),
                    ));
                }
                require_range("travelers", d.travelers, 1, MAX_TRAVELERS)
            }
        }
    }
}

fn require_past_date(field: &str, date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date > today {
        return Err(CoveraError::InvalidInput(format!("{field}: must not be in the future")));
    }
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* Submission and stored lead */
/* -------------------------------------------------------------------------- */

/// Contact fields shared by every lead form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ContactInfo {
    /// Validate name, phone and (when present) email.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_phone(&self.phone)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Forms post `""` for untouched optional inputs; treat blank as absent.
fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
}

/// Body of the lead submission endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(flatten)]
    pub contact: ContactInfo,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub affiliate_code: Option<String>,
    #[serde(flatten)]
    pub details: LeadDetails,
}

impl LeadSubmission {
    /// Validate contact fields, affiliate code format and product details.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        self.contact.validate()?;
        if let Some(code) = &self.affiliate_code {
            validate_affiliate_code(code)?;
        }
        self.details.validate(today)
    }
}

/// A validated lead ready to be inserted; the assignee is chosen at insert time
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub id: String,
    pub contact: ContactInfo,
    pub affiliate_code: Option<String>,
    pub details: LeadDetails,
    pub created_at: DateTime<Utc>,
}

/// Stored lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub product_type: ProductType,
    pub details: LeadDetails,
    pub status: LeadStatus,
    pub contact: ContactInfo,
    pub affiliate_code: Option<String>,
    pub assigned_admin_id: Option<String>,
    /// Partner earning once the commission has been reflected.
    pub commission: Option<f64>,
    pub total_premium: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Whether the commission for this lead has already been paid out.
    pub fn commission_reflected(&self) -> bool {
        self.commission.is_some()
    }
}
