//! FILENAME: core/persistence/src/report.rs
// PURPOSE: Tabular report model written out by the XLSX exporter.

use serde::{Deserialize, Serialize};

/// A single exported value. Money and percentages carry their own formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ReportCell {
    Empty,
    Text(String),
    Number(f64),
    Currency(f64),
    /// Percentage in points (15.5 means 15.5%)
    Percent(f64),
}

impl From<&str> for ReportCell {
    fn from(value: &str) -> Self {
        ReportCell::Text(value.to_string())
    }
}

impl From<String> for ReportCell {
    fn from(value: String) -> Self {
        ReportCell::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<ReportCell>>,
}

impl ReportSheet {
    pub fn new(name: impl Into<String>, headers: &[&str]) -> Self {
        ReportSheet {
            name: name.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<ReportCell>) {
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub sheets: Vec<ReportSheet>,
    /// Symbol used in currency number formats (e.g. "$")
    pub currency_symbol: String,
}

impl Report {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Report {
            sheets: Vec::new(),
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn add_sheet(&mut self, sheet: ReportSheet) {
        self.sheets.push(sheet);
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.iter().all(|s| s.rows.is_empty())
    }
}
