//! FILENAME: app/src/pricing_commands.rs
//! PURPOSE: Pricing page commands: gather inputs over the bridge, run the
//! pricing engine, and keep the last results for display and export.
//! CONTEXT: Monthly sales per product are counted client-side from
//! `sales:getAll` over a trailing window (30 days unless overridden).

use analytics::{units_by_product, DateRange, SaleRecord, MAX_RANGE_DAYS};
use chrono::{NaiveDate, Utc};
use pricing::{
    calculate_pricing, summarize, MarginBand, OperatingExpenses, PricingParameters,
    PricingResult, PricingSummary, Product,
};
use serde::{Deserialize, Serialize};

use crate::api_types::{CatalogProduct, ProductQuery};
use crate::bridge::{Api, IpcBridge};
use crate::{log_enter_info, log_exit_info, log_info, AppState};

/// Days of sales history counted as "monthly" sales.
pub const DEFAULT_SALES_WINDOW_DAYS: u32 = 30;

// ============================================================================
// STATE
// ============================================================================

/// Inputs and output of the last pricing run.
#[derive(Debug, Clone, Default)]
pub struct PricingState {
    pub expenses: OperatingExpenses,
    pub params: Option<PricingParameters>,
    pub results: Vec<PricingResult>,
    pub summary: Option<PricingSummary>,
    /// When the results were calculated (RFC 3339)
    pub calculated_at: Option<String>,
}

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    /// Products to price; all catalog products when `None`
    #[serde(default)]
    pub product_ids: Option<Vec<String>>,
    pub expenses: OperatingExpenses,
    /// Falls back to the defaults seeded from settings
    #[serde(default)]
    pub params: Option<PricingParameters>,
    #[serde(default)]
    pub sales_window_days: Option<u32>,
    /// Last day of the sales window; today when absent
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// One result row with its margin band for colouring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRow {
    #[serde(flatten)]
    pub result: PricingResult,
    pub band: MarginBand,
    pub color: String,
}

impl From<&PricingResult> for PricingRow {
    fn from(result: &PricingResult) -> Self {
        let band = MarginBand::from_margin(result.profit_margin);
        PricingRow {
            result: result.clone(),
            band,
            color: band.color().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingReport {
    pub rows: Vec<PricingRow>,
    pub summary: PricingSummary,
    pub calculated_at: Option<String>,
}

impl PricingReport {
    fn from_state(pricing: &PricingState) -> Self {
        PricingReport {
            rows: pricing.results.iter().map(PricingRow::from).collect(),
            summary: pricing.summary.clone().unwrap_or_default(),
            calculated_at: pricing.calculated_at.clone(),
        }
    }
}

// ============================================================================
// INPUTS
// ============================================================================

/// Default parameters, with the tax rate taken from store settings.
pub fn default_pricing_parameters(state: &AppState) -> Result<PricingParameters, String> {
    let settings = state.settings.lock().map_err(|e| e.to_string())?;
    Ok(PricingParameters {
        tax_rate: settings.tax_rate,
        ..PricingParameters::default()
    })
}

/// Build engine products from catalog entries and unit counts over `window`.
pub fn products_from_catalog(
    catalog: &[CatalogProduct],
    sales: &[SaleRecord],
    window: &DateRange,
) -> Vec<Product> {
    let units = units_by_product(sales, window);
    catalog
        .iter()
        .map(|p| {
            let sold = units.get(&p.id).copied().unwrap_or(0);
            Product::new(p.id.clone(), p.name.clone(), p.cost, sold).with_current_price(p.price)
        })
        .collect()
}

/// Catalog products with their unit sales over the trailing window.
pub fn load_pricing_products(
    bridge: &dyn IpcBridge,
    window_days: u32,
    as_of: NaiveDate,
) -> Result<Vec<Product>, String> {
    let api = Api::new(bridge);
    let catalog = api
        .products_get_all(&ProductQuery::default())
        .map_err(|e| e.to_string())?;
    let sales: Vec<SaleRecord> = api
        .sales_get_all()
        .map_err(|e| e.to_string())?
        .iter()
        .filter_map(|s| s.to_record())
        .collect();

    let window = DateRange::ending_on(as_of, window_days);
    Ok(products_from_catalog(&catalog, &sales, &window))
}

/// Expenses with salaries filled in from the employee list. Bills and
/// other costs are kept from the last run.
pub fn suggest_expenses(state: &AppState, bridge: &dyn IpcBridge) -> Result<OperatingExpenses, String> {
    let employees = Api::new(bridge)
        .employees_get_all()
        .map_err(|e| e.to_string())?;
    let salaries: f64 = employees
        .iter()
        .map(|e| e.salary)
        .filter(|s| s.is_finite() && *s > 0.0)
        .sum();

    let pricing = state.pricing.lock().map_err(|e| e.to_string())?;
    Ok(OperatingExpenses {
        salaries,
        ..pricing.expenses
    })
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Price an explicit product list and keep the results.
pub fn run_pricing(
    state: &AppState,
    products: &[Product],
    expenses: OperatingExpenses,
    params: PricingParameters,
) -> Result<PricingReport, String> {
    log_enter_info!("PRICING", "run_pricing", "products={}", products.len());

    let results = calculate_pricing(products, &expenses, &params);
    let summary = summarize(&results, &expenses, &params);

    let mut pricing = state.pricing.lock().map_err(|e| e.to_string())?;
    *pricing = PricingState {
        expenses,
        params: Some(params),
        results,
        summary: Some(summary),
        calculated_at: Some(Utc::now().to_rfc3339()),
    };

    let report = PricingReport::from_state(&pricing);
    log_exit_info!(
        "PRICING",
        "run_pricing",
        "revenue={:.2} margin={:.2}%",
        report.summary.total_monthly_revenue,
        report.summary.average_margin
    );
    Ok(report)
}

/// Fetch catalog and sales, select products, and price them.
pub fn calculate_prices(
    state: &AppState,
    bridge: &dyn IpcBridge,
    request: PricingRequest,
) -> Result<PricingReport, String> {
    let as_of = request.as_of.unwrap_or_else(crate::today);
    let window_days = request
        .sales_window_days
        .unwrap_or(DEFAULT_SALES_WINDOW_DAYS)
        .clamp(1, MAX_RANGE_DAYS);

    let mut products = load_pricing_products(bridge, window_days, as_of)?;
    if let Some(ids) = &request.product_ids {
        products.retain(|p| ids.contains(&p.id));
    }
    if products.is_empty() {
        return Err("Select at least one product to price".to_string());
    }

    let params = match request.params {
        Some(params) => params,
        None => default_pricing_parameters(state)?,
    };
    log_info!(
        "PRICING",
        "pricing {} product(s) over {} day(s) ending {}",
        products.len(),
        window_days,
        as_of
    );
    run_pricing(state, &products, request.expenses, params)
}

pub fn get_pricing_results(state: &AppState) -> Result<PricingReport, String> {
    let pricing = state.pricing.lock().map_err(|e| e.to_string())?;
    Ok(PricingReport::from_state(&pricing))
}

pub fn clear_pricing(state: &AppState) -> Result<(), String> {
    let mut pricing = state.pricing.lock().map_err(|e| e.to_string())?;
    *pricing = PricingState::default();
    log_info!("PRICING", "cleared pricing results");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn catalog_product(id: &str, cost: f64, price: f64) -> CatalogProduct {
        CatalogProduct {
            id: id.to_string(),
            name: format!("Product {}", id),
            price,
            cost,
            stock: 10.0,
            category: None,
            reorder_point: None,
        }
    }

    #[test]
    fn test_units_counted_inside_window_only() {
        let catalog = vec![catalog_product("a", 5.0, 9.0), catalog_product("b", 2.0, 3.0)];
        let sales = vec![
            SaleRecord::new("s1", d(2024, 6, 30), 18.0).with_line("a", 2, 9.0),
            SaleRecord::new("s2", d(2024, 6, 10), 27.0).with_line("a", 3, 9.0),
            SaleRecord::new("s3", d(2024, 5, 1), 30.0).with_line("b", 10, 3.0),
        ];
        let window = DateRange::ending_on(d(2024, 6, 30), 30);

        let products = products_from_catalog(&catalog, &sales, &window);
        assert_eq!(products[0].monthly_sales, 5);
        assert_eq!(products[0].current_price, 9.0);
        assert_eq!(products[1].monthly_sales, 0);
    }

    #[test]
    fn test_row_band_color() {
        let product = Product::new("a", "A", 10.0, 100);
        let params = PricingParameters {
            desired_margin: 50.0,
            include_expenses: false,
            ..PricingParameters::default()
        };
        let results = calculate_pricing(&[product], &OperatingExpenses::default(), &params);
        let row = PricingRow::from(&results[0]);
        assert_eq!(row.band, MarginBand::Healthy);
        assert_eq!(row.color, "green");
    }
}
