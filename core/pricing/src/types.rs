//! FILENAME: core/pricing/src/types.rs
// PURPOSE: Inputs and outputs of the pricing calculation.
// CONTEXT: All structs use camelCase serialization so they can travel to the UI unchanged.

use serde::{Deserialize, Serialize};

// ============================================================================
// INPUTS
// ============================================================================

/// A product selected for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Price currently charged at the register
    #[serde(default)]
    pub current_price: f64,
    /// Unit cost (purchase or production cost)
    #[serde(default)]
    pub cost: f64,
    /// Units sold in the trailing sales window
    #[serde(default)]
    pub monthly_sales: u32,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: f64, monthly_sales: u32) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            current_price: 0.0,
            cost,
            monthly_sales,
        }
    }

    pub fn with_current_price(mut self, price: f64) -> Self {
        self.current_price = price;
        self
    }
}

/// Recurring monthly operating costs, entered by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingExpenses {
    #[serde(default)]
    pub monthly_bills: f64,
    #[serde(default)]
    pub salaries: f64,
    #[serde(default)]
    pub other_costs: f64,
}

impl OperatingExpenses {
    pub fn new(monthly_bills: f64, salaries: f64, other_costs: f64) -> Self {
        OperatingExpenses {
            monthly_bills,
            salaries,
            other_costs,
        }
    }

    /// Sum of the three expense fields. Non-finite fields count as zero.
    pub fn total(&self) -> f64 {
        finite_or_zero(self.monthly_bills) + finite_or_zero(self.salaries) + finite_or_zero(self.other_costs)
    }
}

/// Percentages applied on top of cost, plus the expense toggle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingParameters {
    /// Inflation rate in percent (e.g. 5.0 = 5%)
    #[serde(default)]
    pub inflation_rate: f64,
    /// Sales tax rate in percent
    #[serde(default)]
    pub tax_rate: f64,
    /// Desired profit margin in percent, applied as a markup
    #[serde(default)]
    pub desired_margin: f64,
    /// When false, operating expenses are ignored entirely
    #[serde(default = "default_include_expenses")]
    pub include_expenses: bool,
}

fn default_include_expenses() -> bool {
    true
}

impl Default for PricingParameters {
    fn default() -> Self {
        PricingParameters {
            inflation_rate: 0.0,
            tax_rate: 0.0,
            desired_margin: 30.0,
            include_expenses: true,
        }
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Per-product pricing breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub product_id: String,
    pub product_name: String,
    pub cost: f64,
    pub current_price: f64,
    pub monthly_sales: u32,
    /// Share of total unit sales (0..=1)
    pub sales_ratio: f64,
    pub allocated_expense_per_unit: f64,
    /// Allocated expense across all units sold (per_unit * monthly_sales)
    pub allocated_expense_total: f64,
    pub inflation_amount: f64,
    pub tax_amount: f64,
    pub recommended_price: f64,
    pub profit_per_unit: f64,
    /// Profit margin in percent of the recommended price
    pub profit_margin: f64,
    pub monthly_revenue: f64,
    pub monthly_profit: f64,
    /// recommended_price - current_price
    pub price_change: f64,
    /// Change relative to the current price in percent (0 when no current price)
    pub price_change_percent: f64,
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_parameters_take_defaults() {
        let params: PricingParameters = serde_json::from_value(json!({ "taxRate": 16 })).unwrap();
        assert_eq!(params.tax_rate, 16.0);
        assert_eq!(params.desired_margin, 0.0);
        assert!(params.include_expenses);

        let expenses: OperatingExpenses = serde_json::from_value(json!({ "salaries": 2000 })).unwrap();
        assert_eq!(expenses.total(), 2000.0);
    }

    #[test]
    fn test_product_wire_names() {
        let product = Product::new("7", "Oat milk", 1.5, 40).with_current_price(3.0);
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["currentPrice"], json!(3.0));
        assert_eq!(value["monthlySales"], json!(40));
        assert!(value.get("current_price").is_none());
    }

    #[test]
    fn test_non_finite_expenses_count_as_zero() {
        let expenses = OperatingExpenses::new(f64::NAN, 100.0, f64::INFINITY);
        assert_eq!(expenses.total(), 100.0);
    }
}
