//! Commission calculator
//!
//! ```text
//! base_commission = total_premium × rate[product]
//! company_share   = base_commission × 0.30
//! partner_earning = (base_commission × 0.70) ÷ 2
//! ```

use covera_domain::constants::{COMPANY_SHARE_RATIO, REFERRAL_POOL_RATIO, REFERRAL_POOL_SPLIT};
use covera_domain::{CoveraError, EarningBreakdown, ProductType, Result};

use super::rates::CommissionRateTable;

/// Converts a policy premium into a partner payout
#[derive(Debug, Clone, Default)]
pub struct CommissionCalculator {
    rates: CommissionRateTable,
}

impl CommissionCalculator {
    /// Calculator over the given rate table.
    pub fn new(rates: CommissionRateTable) -> Self {
        Self { rates }
    }

    /// Calculate the breakdown for a product the rate table knows about.
    ///
    /// # Errors
    /// `InvalidInput` if the product has no rate, or the premium is negative
    /// or not finite. Both checks run before any arithmetic.
    pub fn calculate(&self, product: ProductType, total_premium: f64) -> Result<EarningBreakdown> {
        let rate = self.rates.rate_for(product).ok_or_else(|| {
            CoveraError::InvalidInput(format!("no commission rate for product type: {product}"))
        })?;
        if !total_premium.is_finite() || total_premium < 0.0 {
            return Err(CoveraError::InvalidInput(
                "total_premium: must be a non-negative amount".into(),
            ));
        }

        let base_commission = total_premium * rate;
        let company_share = base_commission * COMPANY_SHARE_RATIO;
        let partner_earning = (base_commission * REFERRAL_POOL_RATIO) / REFERRAL_POOL_SPLIT;

        Ok(EarningBreakdown {
            product_type: product,
            total_premium,
            commission_rate: rate,
            base_commission,
            company_share,
            partner_earning,
        })
    }

    /// Same as [`calculate`](Self::calculate) for a product given by name.
    pub fn calculate_named(&self, product: &str, total_premium: f64) -> Result<EarningBreakdown> {
        let product: ProductType = product
            .parse()
            .map_err(|_| CoveraError::InvalidInput(format!("unknown product type: {product}")))?;
        self.calculate(product, total_premium)
    }
}

/// Whole units with thousands separators, rounding half away from zero:
/// `1234.5` → `1,235`.
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// [`format_amount`] behind `symbol`, with the sign in front: `-$2,500`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let grouped = format_amount(amount);
    match grouped.strip_prefix('-') {
        Some(magnitude) => format!("-{symbol}{magnitude}"),
        None => format!("{symbol}{grouped}"),
    }
}
