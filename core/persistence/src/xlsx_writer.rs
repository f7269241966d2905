//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::{PersistenceError, Report, ReportCell};
use rust_xlsxwriter::{Format, FormatAlign, Workbook as XlsxWorkbook};
use std::path::Path;

/// Default column width in Excel character units.
const MIN_COLUMN_WIDTH: f64 = 10.0;
const MAX_COLUMN_WIDTH: f64 = 48.0;

pub fn save_report(report: &Report, path: &Path) -> Result<(), PersistenceError> {
    if report.sheets.is_empty() {
        return Err(PersistenceError::EmptyReport("report has no sheets".to_string()));
    }

    let mut xlsx = XlsxWorkbook::new();

    let header_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let currency_format = Format::new().set_num_format(currency_pattern(&report.currency_symbol));
    let percent_format = Format::new().set_num_format("0.00%");
    let number_format = Format::new().set_num_format("#,##0.##");

    for sheet in &report.sheets {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        // Header row
        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }
        if !sheet.headers.is_empty() {
            worksheet.set_freeze_panes(1, 0)?;
        }

        // Data rows start under the header
        for (i, row) in sheet.rows.iter().enumerate() {
            let row_index = (i + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    ReportCell::Empty => {}
                    ReportCell::Text(s) => {
                        worksheet.write_string(row_index, col, s)?;
                    }
                    ReportCell::Number(n) => {
                        worksheet.write_number_with_format(row_index, col, finite(*n), &number_format)?;
                    }
                    ReportCell::Currency(n) => {
                        worksheet.write_number_with_format(row_index, col, finite(*n), &currency_format)?;
                    }
                    ReportCell::Percent(p) => {
                        worksheet.write_number_with_format(row_index, col, finite(*p) / 100.0, &percent_format)?;
                    }
                }
            }
        }

        // Size columns from the longest header or text value
        for col in 0..column_count(sheet) {
            let widest = std::iter::once(sheet.headers.get(col).map_or(0, |h| h.chars().count()))
                .chain(sheet.rows.iter().map(|row| match row.get(col) {
                    Some(ReportCell::Text(s)) => s.chars().count(),
                    _ => 0,
                }))
                .max()
                .unwrap_or(0);
            let width = (widest as f64 + 2.0).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
            worksheet.set_column_width(col as u16, width)?;
        }
    }

    xlsx.save(path)?;
    Ok(())
}

fn column_count(sheet: &crate::ReportSheet) -> usize {
    sheet
        .rows
        .iter()
        .map(|r| r.len())
        .chain(std::iter::once(sheet.headers.len()))
        .max()
        .unwrap_or(0)
}

fn currency_pattern(symbol: &str) -> String {
    if symbol.is_empty() {
        "#,##0.00".to_string()
    } else {
        format!("\"{}\"#,##0.00", symbol.replace('"', ""))
    }
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportSheet;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use tempfile::tempdir;

    fn sample_report() -> Report {
        let mut sheet = ReportSheet::new("Pricing", &["Product", "Units", "Price", "Margin"]);
        sheet.push_row(vec![
            "Coffee".into(),
            ReportCell::Number(100.0),
            ReportCell::Currency(13.2),
            ReportCell::Percent(15.15),
        ]);
        sheet.push_row(vec!["Tea".into(), ReportCell::Number(40.0), ReportCell::Empty, ReportCell::Percent(30.0)]);

        let mut report = Report::new("$");
        report.add_sheet(sheet);
        report
    }

    #[test]
    fn test_save_report_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pricing.xlsx");
        save_report(&sample_report(), &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Pricing".to_string()]);

        let range = workbook.worksheet_range("Pricing").unwrap();
        assert_eq!(range.get_value((0, 0)), Some(&Data::String("Product".to_string())));
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("Coffee".to_string())));
        assert_eq!(range.get_value((1, 2)), Some(&Data::Float(13.2)));
        match range.get_value((1, 3)) {
            Some(Data::Float(v)) => assert!((v - 0.1515).abs() < 1e-9),
            other => panic!("unexpected margin cell: {:?}", other),
        }
        assert_eq!(range.get_value((2, 0)), Some(&Data::String("Tea".to_string())));
    }

    #[test]
    fn test_empty_report_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let result = save_report(&Report::new("$"), &path);
        assert!(matches!(result, Err(PersistenceError::EmptyReport(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_currency_pattern() {
        assert_eq!(currency_pattern("$"), "\"$\"#,##0.00");
        assert_eq!(currency_pattern(""), "#,##0.00");
    }
}
