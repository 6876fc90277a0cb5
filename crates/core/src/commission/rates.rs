//! Commission rate table

use std::collections::HashMap;

use covera_domain::ProductType;

/// Commission rate per product type (fraction, e.g. `0.10` for 10%).
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionRateTable {
    rates: HashMap<ProductType, f64>,
}

impl CommissionRateTable {
    /// The brokerage's published rates.
    pub fn standard() -> Self {
        Self::from_pairs([
            (ProductType::Auto, 0.10),
            (ProductType::Health, 0.15),
            (ProductType::Life, 0.20),
            (ProductType::Property, 0.12),
            (ProductType::Travel, 0.08),
        ])
    }

    /// Build a table from explicit `(product, rate)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ProductType, f64)>) -> Self {
        Self { rates: pairs.into_iter().collect() }
    }

    /// Rate for `product`, or `None` if the table has no entry.
    pub fn rate_for(&self, product: ProductType) -> Option<f64> {
        self.rates.get(&product).copied()
    }
}

impl Default for CommissionRateTable {
    fn default() -> Self {
        Self::standard()
    }
}
