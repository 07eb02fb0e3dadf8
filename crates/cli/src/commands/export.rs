//! Offline export of the filtered product set.
//!
//! # Usage
//!
//! ```bash
//! dp-cli export --format xlsx --sku 10 --margin-min 0.3 --output prices.xlsx
//! ```

use std::path::Path;

use clap::ValueEnum;
use thiserror::Error;

use dynamic_pricing_dashboard::pricing::{
    ExportError, ExportFormat, ProductFilter, dashboard_products,
};

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportCommandError {
    /// Rendering failed.
    #[error("Export error: {0}")]
    Render(#[from] ExportError),

    /// Writing the output file failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Output format flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Self::Csv,
            FormatArg::Xlsx => Self::Xlsx,
        }
    }
}

/// Write the filtered synthetic set to `output`.
///
/// # Returns
///
/// The number of data rows written.
///
/// # Errors
///
/// Returns `ExportCommandError` if rendering or writing fails.
pub async fn run(
    format: FormatArg,
    filter: &ProductFilter,
    output: &Path,
) -> Result<usize, ExportCommandError> {
    let products = filter.apply(&dashboard_products());
    let bytes = ExportFormat::from(format).render(&products)?;

    tokio::fs::write(output, bytes).await?;

    tracing::info!(
        "Exported {} products to {}",
        products.len(),
        output.display()
    );
    Ok(products.len())
}
