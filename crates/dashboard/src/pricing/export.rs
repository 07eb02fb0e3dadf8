//! CSV and spreadsheet export of filtered products.

use std::fmt::Write;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use super::Product;

/// Column headers, in export order.
pub const COLUMNS: [&str; 6] = [
    "sku",
    "total_quantity",
    "suggested_price",
    "total_sales",
    "cost",
    "margin",
];

/// Errors that can occur while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Spreadsheet writer failed.
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),

    /// More rows than a worksheet can hold.
    #[error("too many rows for a worksheet: {0}")]
    TooManyRows(usize),
}

/// Download formats offered on the overview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Attachment file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Csv => "suggested_prices.csv",
            Self::Xlsx => "suggested_prices.xlsx",
        }
    }

    /// MIME type for the `Content-Type` header.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Render products in this format.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the spreadsheet cannot be written.
    pub fn render(self, products: &[Product]) -> Result<Vec<u8>, ExportError> {
        match self {
            Self::Csv => Ok(to_csv(products).into_bytes()),
            Self::Xlsx => to_xlsx(products),
        }
    }
}

/// Render products as CSV with a header row.
#[must_use]
pub fn to_csv(products: &[Product]) -> String {
    let mut csv = COLUMNS.join(",");
    csv.push('\n');

    for p in products {
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{}",
            csv_field(&p.sku),
            p.total_quantity,
            p.suggested_price,
            p.total_sales,
            p.cost,
            p.margin
        );
    }
    csv
}

/// Quote a field if it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// Render products as a single-sheet `.xlsx` workbook.
///
/// # Errors
///
/// Returns `ExportError` if the workbook cannot be written.
pub fn to_xlsx(products: &[Product]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("suggested_prices")?;

    for (col, name) in (0u16..).zip(COLUMNS) {
        worksheet.write_string_with_format(0, col, name, &header)?;
    }

    for (i, p) in products.iter().enumerate() {
        let row = u32::try_from(i + 1).map_err(|_| ExportError::TooManyRows(products.len()))?;
        worksheet.write_string(row, 0, &p.sku)?;
        worksheet.write_number(row, 1, p.total_quantity)?;
        worksheet.write_number(row, 2, p.suggested_price)?;
        worksheet.write_number(row, 3, p.total_sales)?;
        worksheet.write_number(row, 4, p.cost)?;
        worksheet.write_number(row, 5, p.margin)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pricing::{ProductFilter, dashboard_products};

    #[test]
    fn test_csv_header_and_rows() {
        let products = vec![
            Product::new("SKU-1000".into(), 12, 150.0, 90.0),
            Product::new("SKU-1001".into(), 3, 200.0, 120.0),
        ];
        let csv = to_csv(&products);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "sku,total_quantity,suggested_price,total_sales,cost,margin"
        );
        assert_eq!(lines[1], "SKU-1000,12,150,1800,90,0.4");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_of_filtered_set() {
        let products = dashboard_products();
        let filtered = ProductFilter::default().apply(&products);
        let csv = to_csv(&filtered);
        assert_eq!(csv.lines().count(), filtered.len() + 1);
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_xlsx_is_a_zip() {
        let bytes = to_xlsx(&dashboard_products()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Csv.file_name(), "suggested_prices.csv");
        assert_eq!(ExportFormat::Csv.content_type(), "text/csv");
        assert_eq!(ExportFormat::Xlsx.file_name(), "suggested_prices.xlsx");
        assert!(ExportFormat::Xlsx.content_type().contains("spreadsheetml"));
    }
}
