//! FILENAME: core/analytics/src/sale.rs
// PURPOSE: Minimal sale shape the aggregations work on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// A completed sale, dated by the day it was rung up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    pub date: NaiveDate,
    pub total: f64,
    #[serde(default)]
    pub lines: Vec<SaleLine>,
}

impl SaleRecord {
    pub fn new(id: impl Into<String>, date: NaiveDate, total: f64) -> Self {
        SaleRecord {
            id: id.into(),
            date,
            total,
            lines: Vec::new(),
        }
    }

    pub fn with_line(mut self, product_id: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        self.lines.push(SaleLine {
            product_id: product_id.into(),
            quantity,
            unit_price,
        });
        self
    }

    pub fn units(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity as u64).sum()
    }
}
