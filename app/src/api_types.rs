//! FILENAME: app/src/api_types.rs
// PURPOSE: Shared type definitions for IPC bridge payloads.
// CONTEXT: All structs use camelCase serialization for JavaScript interoperability.
//          Ids arrive as numbers from SQLite-backed channels and as strings from
//          others; both deserialize into String.

use analytics::{DateRange, SaleRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// HELPERS
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Int(i64),
    Float(f64),
}

/// Accept numeric or string ids.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(s) => s,
        IdRepr::Int(n) => n.to_string(),
        IdRepr::Float(f) => f.to_string(),
    })
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    25
}

/// Parse the date part of a timestamp as sent by the backend:
/// RFC 3339, "YYYY-MM-DD HH:MM:SS", or a bare "YYYY-MM-DD".
pub fn parse_day(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

// ============================================================================
// SALES / CATALOG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    #[serde(deserialize_with = "de_id")]
    pub product_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
}

/// A sale as returned by `sales:getAll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "date")]
    pub created_at: String,
    pub total: f64,
    #[serde(default)]
    pub items: Vec<SaleItem>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl Sale {
    /// Convert to the aggregation record. Sales with unreadable dates are dropped.
    pub fn to_record(&self) -> Option<SaleRecord> {
        let date = parse_day(&self.created_at)?;
        let mut record = SaleRecord::new(self.id.clone(), date, self.total);
        for item in &self.items {
            record = record.with_line(item.product_id.clone(), item.quantity, item.price);
        }
        Some(record)
    }
}

/// A catalog product as returned by `products:getAll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub stock: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub reorder_point: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Monthly salary
    #[serde(default)]
    pub salary: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub total_spent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for CustomerQuery {
    fn default() -> Self {
        CustomerQuery {
            search: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

// ============================================================================
// STORES / DEPOSITS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositInput {
    pub amount: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Deposit date (YYYY-MM-DD); the backend uses today when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub amount: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

// ============================================================================
// FORECASTS / HEALTH / INSIGHTS
// ============================================================================

/// Date-window parameters sent with report channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    pub start_date: String,
    pub end_date: String,
}

impl From<&DateRange> for DateRangeParams {
    fn from(range: &DateRange) -> Self {
        DateRangeParams {
            start_date: range.start.format("%Y-%m-%d").to_string(),
            end_date: range.end.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: String,
    pub predicted: f64,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
}

/// Response of `forecast:revenue`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueForecast {
    #[serde(default)]
    pub historical: Vec<SeriesPoint>,
    #[serde(default)]
    pub forecast: Vec<ForecastPoint>,
    /// Growth over the forecast horizon in percent
    #[serde(default)]
    pub growth_rate: f64,
    /// Model confidence 0..=1
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowDay {
    pub date: String,
    #[serde(default)]
    pub inflow: f64,
    #[serde(default)]
    pub outflow: f64,
    pub balance: f64,
}

/// Response of `forecast:cashflow`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowProjection {
    #[serde(default)]
    pub opening_balance: f64,
    #[serde(default)]
    pub days: Vec<CashflowDay>,
}

/// Response of `health:financial`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealth {
    /// Overall score 0..=100
    pub score: f64,
    #[serde(default)]
    pub profit_margin: f64,
    #[serde(default)]
    pub expense_ratio: f64,
    #[serde(default)]
    pub current_ratio: f64,
    #[serde(default)]
    pub revenue_growth: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Element of the `reorder:getAlerts` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderAlert {
    #[serde(deserialize_with = "de_id")]
    pub product_id: String,
    pub product_name: String,
    pub current_stock: f64,
    #[serde(default)]
    pub reorder_point: f64,
    #[serde(default)]
    pub suggested_quantity: f64,
    #[serde(default)]
    pub days_until_stockout: Option<f64>,
}

/// Element of the `insights:products` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInsight {
    #[serde(deserialize_with = "de_id")]
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub units_sold: f64,
    /// Profit margin in percent
    #[serde(default)]
    pub profit_margin: f64,
    #[serde(default)]
    pub trend: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightParams {
    #[serde(flatten)]
    pub range: DateRangeParams,
    pub limit: u32,
}

// ============================================================================
// SEARCH
// ============================================================================

/// One page of search results, stored as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl<T> SearchPage<T> {
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        ((self.total + self.page_size as u64 - 1) / self.page_size as u64) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: f64,
    /// "income" or "expense"
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: f64,
    #[serde(default)]
    pub reorder_point: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSearchParams {
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for FinanceSearchParams {
    fn default() -> Self {
        FinanceSearchParams {
            query: String::new(),
            start_date: None,
            end_date: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySearchParams {
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub low_stock_only: bool,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for InventorySearchParams {
    fn default() -> Self {
        InventorySearchParams {
            query: String::new(),
            category: None,
            low_stock_only: false,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

// ============================================================================
// AUTH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    Manager,
    Cashier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_day_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(parse_day("2024-06-15T10:30:00Z"), Some(expected));
        assert_eq!(parse_day("2024-06-15T10:30:00+02:00"), Some(expected));
        assert_eq!(parse_day("2024-06-15 10:30:00"), Some(expected));
        assert_eq!(parse_day("2024-06-15T10:30:00.123"), Some(expected));
        assert_eq!(parse_day("2024-06-15"), Some(expected));
        assert_eq!(parse_day("yesterday"), None);
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let sale: Sale = serde_json::from_value(json!({
            "id": 42,
            "date": "2024-06-15",
            "total": 12.5,
            "items": [{ "productId": "p-1", "quantity": 2, "price": 6.25 }]
        }))
        .unwrap();
        assert_eq!(sale.id, "42");
        assert_eq!(sale.items[0].product_id, "p-1");

        let record = sale.to_record().unwrap();
        assert_eq!(record.units(), 2);
    }

    #[test]
    fn test_sale_with_bad_date_is_dropped() {
        let sale = Sale {
            id: "1".to_string(),
            created_at: "not a date".to_string(),
            total: 5.0,
            items: Vec::new(),
            payment_method: None,
        };
        assert!(sale.to_record().is_none());
    }

    #[test]
    fn test_search_page_defaults_and_pages() {
        let page: SearchPage<InventoryItem> = serde_json::from_value(json!({ "total": 51 })).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 25);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_insight_params_flatten() {
        let params = InsightParams {
            range: DateRangeParams {
                start_date: "2024-01-01".to_string(),
                end_date: "2024-01-31".to_string(),
            },
            limit: 10,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, json!({ "startDate": "2024-01-01", "endDate": "2024-01-31", "limit": 10 }));
    }
}
