//! FILENAME: core/pricing/src/calculator.rs
//! PURPOSE: Cost -> expense allocation -> inflation -> margin -> tax cascade.
//! CONTEXT: Pure function over a product selection. Every call recomputes
//! from scratch; division by zero resolves to 0 rather than NaN.

use crate::types::{finite_or_zero, OperatingExpenses, PricingParameters, PricingResult, Product};

/// Round to two decimal places (cents).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Divide, yielding 0 when the denominator is 0 or the quotient is not finite.
fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    finite_or_zero(numerator / denominator)
}

/// Compute a recommended price and profitability breakdown for every product.
///
/// Operating expenses are spread across products in proportion to their
/// share of total unit sales. A product with no sales gets no allocation
/// but is still priced from cost.
pub fn calculate_pricing(
    products: &[Product],
    expenses: &OperatingExpenses,
    params: &PricingParameters,
) -> Vec<PricingResult> {
    let total_monthly_sales: f64 = products.iter().map(|p| p.monthly_sales as f64).sum();
    let total_expenses = if params.include_expenses {
        expenses.total()
    } else {
        0.0
    };

    let inflation_rate = finite_or_zero(params.inflation_rate);
    let desired_margin = finite_or_zero(params.desired_margin);
    let tax_rate = finite_or_zero(params.tax_rate);

    products
        .iter()
        .map(|product| {
            let cost = finite_or_zero(product.cost);
            let current_price = finite_or_zero(product.current_price);
            let units = product.monthly_sales as f64;

            // 1-2. Sales-weighted expense allocation
            let sales_ratio = safe_div(units, total_monthly_sales);
            let allocated_expense_per_unit = safe_div(total_expenses * sales_ratio, units);

            // 3-5. Base price, inflation, margin
            let mut base_price = cost + allocated_expense_per_unit;
            let inflation_amount = base_price * inflation_rate / 100.0;
            base_price += inflation_amount;
            base_price += base_price * desired_margin / 100.0;

            // 6. Tax on top of the marked-up price
            let tax_amount = base_price * tax_rate / 100.0;
            let recommended_price = round2(base_price + tax_amount).max(0.0);

            // 7-8. Profitability
            let profit_per_unit = recommended_price - cost - allocated_expense_per_unit - tax_amount;
            let profit_margin = safe_div(profit_per_unit, recommended_price) * 100.0;

            let price_change = recommended_price - current_price;
            let price_change_percent = safe_div(price_change, current_price) * 100.0;

            PricingResult {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                cost,
                current_price,
                monthly_sales: product.monthly_sales,
                sales_ratio,
                allocated_expense_per_unit,
                allocated_expense_total: allocated_expense_per_unit * units,
                inflation_amount,
                tax_amount,
                recommended_price,
                profit_per_unit,
                profit_margin,
                monthly_revenue: recommended_price * units,
                monthly_profit: profit_per_unit * units,
                price_change,
                price_change_percent,
            }
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn params(inflation: f64, margin: f64, tax: f64) -> PricingParameters {
        PricingParameters {
            inflation_rate: inflation,
            tax_rate: tax,
            desired_margin: margin,
            include_expenses: true,
        }
    }

    #[test]
    fn test_single_product_worked_example() {
        let products = vec![Product::new("p1", "Coffee", 10.0, 100)];
        let results = calculate_pricing(&products, &OperatingExpenses::default(), &params(0.0, 20.0, 10.0));

        let r = &results[0];
        assert!(approx(r.sales_ratio, 1.0));
        assert!(approx(r.allocated_expense_per_unit, 0.0));
        assert!(approx(r.tax_amount, 1.2));
        assert!(approx(r.recommended_price, 13.20));
        assert!(approx(r.profit_per_unit, 2.0));
        assert!((r.profit_margin - 15.1515).abs() < 0.001);
        assert!(approx(r.monthly_revenue, 1320.0));
        assert!(approx(r.monthly_profit, 200.0));
    }

    #[test]
    fn test_two_products_share_expenses_by_sales() {
        let products = vec![
            Product::new("a", "Bread", 2.0, 100),
            Product::new("b", "Milk", 1.0, 300),
        ];
        let expenses = OperatingExpenses::new(1000.0, 2500.0, 500.0);
        let results = calculate_pricing(&products, &expenses, &params(0.0, 0.0, 0.0));

        assert!(approx(results[0].sales_ratio, 0.25));
        assert!(approx(results[1].sales_ratio, 0.75));
        assert!(approx(results[0].allocated_expense_total, 1000.0));
        assert!(approx(results[1].allocated_expense_total, 3000.0));
        assert!(approx(results[0].allocated_expense_per_unit, 10.0));
        assert!(approx(results[1].allocated_expense_per_unit, 10.0));
        assert!(approx(results[0].recommended_price, 12.0));
        assert!(approx(results[1].recommended_price, 11.0));
    }

    #[test]
    fn test_zero_sales_product_gets_no_allocation() {
        let products = vec![
            Product::new("a", "Seller", 5.0, 50),
            Product::new("b", "Shelf warmer", 8.0, 0),
        ];
        let expenses = OperatingExpenses::new(500.0, 0.0, 0.0);

        let results = calculate_pricing(&products, &expenses, &params(3.0, 25.0, 0.0));
        let idle = &results[1];
        assert_eq!(idle.allocated_expense_per_unit, 0.0);
        assert_eq!(idle.sales_ratio, 0.0);
        assert!(approx(idle.profit_per_unit, idle.recommended_price - idle.cost));
        assert_eq!(idle.monthly_profit, 0.0);
        assert_eq!(idle.monthly_revenue, 0.0);

        // With tax the tax amount is the only other deduction
        let taxed = calculate_pricing(&products, &expenses, &params(3.0, 25.0, 8.0));
        let idle = &taxed[1];
        assert!(approx(idle.profit_per_unit, idle.recommended_price - idle.cost - idle.tax_amount));

        // The whole pool lands on the product that sells
        assert!(approx(results[0].allocated_expense_total, 500.0));
    }

    #[test]
    fn test_sales_ratios_sum_to_one() {
        let products: Vec<Product> = (1..=7)
            .map(|i| Product::new(format!("p{}", i), format!("Item {}", i), i as f64, i * 13))
            .collect();
        let results = calculate_pricing(&products, &OperatingExpenses::new(1.0, 2.0, 3.0), &params(0.0, 0.0, 0.0));

        let sum: f64 = results.iter().map(|r| r.sales_ratio).sum();
        assert!((sum - 1.0).abs() < EPS);

        let allocated: f64 = results.iter().map(|r| r.allocated_expense_total).sum();
        assert!((allocated - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_sales_anywhere_yields_zero_ratios() {
        let products = vec![Product::new("a", "A", 4.0, 0), Product::new("b", "B", 6.0, 0)];
        let results = calculate_pricing(&products, &OperatingExpenses::new(100.0, 0.0, 0.0), &params(0.0, 50.0, 0.0));
        assert!(results.iter().all(|r| r.sales_ratio == 0.0));
        assert!(approx(results[0].recommended_price, 6.0));
        assert!(approx(results[1].recommended_price, 9.0));
    }

    #[test]
    fn test_recommended_price_is_monotonic_in_each_rate() {
        let products = vec![
            Product::new("a", "A", 7.5, 40),
            Product::new("b", "B", 3.25, 160),
        ];
        let expenses = OperatingExpenses::new(300.0, 900.0, 120.0);
        let steps: Vec<f64> = (0..=20).map(|i| i as f64 * 2.5).collect();

        let price_for = |p: PricingParameters| calculate_pricing(&products, &expenses, &p)[1].recommended_price;

        for window in steps.windows(2) {
            let (lo, hi) = (window[0], window[1]);
            assert!(price_for(params(lo, 20.0, 8.0)) <= price_for(params(hi, 20.0, 8.0)));
            assert!(price_for(params(4.0, lo, 8.0)) <= price_for(params(4.0, hi, 8.0)));
            assert!(price_for(params(4.0, 20.0, lo)) <= price_for(params(4.0, 20.0, hi)));
        }
    }

    #[test]
    fn test_disabling_expenses_matches_zero_expenses() {
        let products = vec![
            Product::new("a", "A", 12.0, 10).with_current_price(15.0),
            Product::new("b", "B", 0.5, 990).with_current_price(1.0),
        ];
        let mut off = params(2.0, 35.0, 16.0);
        off.include_expenses = false;
        let disabled = calculate_pricing(&products, &OperatingExpenses::new(800.0, 4000.0, 250.0), &off);
        let zeroed = calculate_pricing(&products, &OperatingExpenses::default(), &params(2.0, 35.0, 16.0));
        assert_eq!(disabled, zeroed);
    }

    #[test]
    fn test_margin_is_zero_without_cost_or_sales() {
        let products = vec![Product::new("x", "Placeholder", 0.0, 0)];
        let results = calculate_pricing(&products, &OperatingExpenses::default(), &params(5.0, 40.0, 10.0));
        assert_eq!(results[0].recommended_price, 0.0);
        assert_eq!(results[0].profit_margin, 0.0);
        assert!(!results[0].profit_margin.is_nan());
    }

    #[test]
    fn test_recommended_price_never_negative() {
        let products = vec![Product::new("x", "Odd", 10.0, 5)];
        let results = calculate_pricing(&products, &OperatingExpenses::default(), &params(0.0, -250.0, 0.0));
        assert_eq!(results[0].recommended_price, 0.0);
        assert_eq!(results[0].profit_margin, 0.0);
    }

    #[test]
    fn test_non_finite_inputs_count_as_zero() {
        let products = vec![Product::new("x", "Broken", f64::NAN, 10)];
        let expenses = OperatingExpenses::new(f64::INFINITY, 0.0, 0.0);
        let results = calculate_pricing(&products, &expenses, &params(f64::NAN, 10.0, 0.0));
        assert_eq!(results[0].cost, 0.0);
        assert_eq!(results[0].recommended_price, 0.0);
        assert!(results[0].profit_margin.is_finite());
    }

    #[test]
    fn test_price_change_against_current_price() {
        let products = vec![Product::new("a", "Tea", 10.0, 10).with_current_price(12.0)];
        let results = calculate_pricing(&products, &OperatingExpenses::default(), &params(0.0, 50.0, 0.0));
        assert!(approx(results[0].recommended_price, 15.0));
        assert!(approx(results[0].price_change, 3.0));
        assert!(approx(results[0].price_change_percent, 25.0));
    }

    #[test]
    fn test_identical_inputs_identical_outputs() {
        let products = vec![Product::new("a", "A", 3.3, 33), Product::new("b", "B", 7.7, 77)];
        let expenses = OperatingExpenses::new(111.0, 222.0, 333.0);
        let p = params(3.5, 27.0, 12.0);
        assert_eq!(calculate_pricing(&products, &expenses, &p), calculate_pricing(&products, &expenses, &p));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(13.200000000000001), 13.2);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(2.346), 2.35);
    }
}
