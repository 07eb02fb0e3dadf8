//! Overview page: stat cards, filters, charts, exports and uploads.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Multipart, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAuth, set_flash, set_page};
use crate::models::{CurrentUser, Flash, Page};
use crate::pricing::{
    ExportFormat, PRICE_CHART_COUNT, Product, ProductFilter, Summary, TOP_SELLING_COUNT,
    dashboard_products,
    format::{bar_width, percent, rupees, thousands},
    top_selling,
};
use crate::state::AppState;

/// Build the overview router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview/upload", post(upload))
        .route("/overview/refresh", post(refresh))
        .route("/export/csv", get(export_csv))
        .route("/export/xlsx", get(export_xlsx))
}

/// Filter inputs shared by the page and the export links.
///
/// Bounds arrive as strings so an empty input field is not a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub sku: Option<String>,
    pub margin_min: Option<String>,
    pub margin_max: Option<String>,
}

impl FilterQuery {
    /// Normalised filter. Unparseable bounds fall back to the defaults.
    #[must_use]
    pub fn to_filter(&self) -> ProductFilter {
        ProductFilter::new(
            self.sku.as_deref(),
            parse_bound(self.margin_min.as_deref()),
            parse_bound(self.margin_max.as_deref()),
        )
    }
}

fn parse_bound(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

/// Headline stat card.
#[derive(Debug, Clone)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

/// One bar in a CSS bar chart.
#[derive(Debug, Clone)]
pub struct BarView {
    pub label: String,
    pub value: String,
    pub width: String,
}

/// Product card in the top-selling list.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub sku: String,
    pub quantity: String,
    pub price: String,
    pub margin: String,
}

impl From<&Product> for ProductCardView {
    fn from(p: &Product) -> Self {
        Self {
            sku: p.sku.clone(),
            quantity: thousands(f64::from(p.total_quantity)),
            price: rupees(p.suggested_price),
            margin: percent(p.margin),
        }
    }
}

/// Overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    pub user: CurrentUser,
    pub active: &'static str,
    pub flash: Option<Flash>,
    pub stats: Vec<StatCard>,
    pub sku: String,
    pub margin_min: String,
    pub margin_max: String,
    pub filtered_count: usize,
    pub top_products: Vec<ProductCardView>,
    pub quantity_bars: Vec<BarView>,
    pub price_bars: Vec<BarView>,
}

impl OverviewTemplate {
    /// Build the page for the given filter inputs.
    ///
    /// Stat cards describe the unfiltered set; everything below the filters
    /// uses the filtered one.
    #[must_use]
    pub fn build(user: CurrentUser, flash: Option<Flash>, query: &FilterQuery) -> Self {
        let products = dashboard_products();
        let summary = Summary::of(&products);

        let filter = query.to_filter();
        let filtered = filter.apply(&products);
        let top = top_selling(&filtered, TOP_SELLING_COUNT);

        Self {
            user,
            active: Page::Overview.name(),
            flash,
            stats: stat_cards(&summary),
            sku: filter.sku().to_owned(),
            margin_min: bound_input(filter.margin_min()),
            margin_max: bound_input(filter.margin_max()),
            filtered_count: filtered.len(),
            top_products: top.iter().map(ProductCardView::from).collect(),
            quantity_bars: quantity_bars(&top),
            price_bars: price_bars(&filtered),
        }
    }
}

/// Text for a bound input. Two decimals unless that would change the value,
/// so the export links filter exactly like the page.
fn bound_input(value: f64) -> String {
    let short = format!("{value:.2}");
    if short.parse::<f64>().is_ok_and(|v| v.to_bits() == value.to_bits()) {
        short
    } else {
        value.to_string()
    }
}

fn stat_cards(summary: &Summary) -> Vec<StatCard> {
    #[allow(clippy::cast_precision_loss)] // a few hundred rows
    let total = summary.total_products as f64;
    vec![
        StatCard {
            label: "Total Products",
            value: thousands(total),
        },
        StatCard {
            label: "Total Revenue",
            value: rupees(summary.total_revenue),
        },
        StatCard {
            label: "Avg Price",
            value: rupees(summary.avg_price),
        },
        StatCard {
            label: "Avg Margin",
            value: percent(summary.avg_margin),
        },
    ]
}

fn quantity_bars(top: &[Product]) -> Vec<BarView> {
    let max = top
        .iter()
        .map(|p| f64::from(p.total_quantity))
        .fold(0.0, f64::max);

    top.iter()
        .map(|p| {
            let qty = f64::from(p.total_quantity);
            BarView {
                label: p.sku.clone(),
                value: thousands(qty),
                width: bar_width(qty, max),
            }
        })
        .collect()
}

fn price_bars(filtered: &[Product]) -> Vec<BarView> {
    let shown = filtered.iter().take(PRICE_CHART_COUNT);
    let max = shown.clone().map(|p| p.suggested_price).fold(0.0, f64::max);

    shown
        .map(|p| BarView {
            label: p.sku.clone(),
            value: rupees(p.suggested_price),
            width: bar_width(p.suggested_price, max),
        })
        .collect()
}

/// Download the filtered set as CSV.
///
/// GET /export/csv
#[instrument(skip_all)]
pub async fn export_csv(
    RequireAuth(_user): RequireAuth,
    Query(query): Query<FilterQuery>,
) -> Result<Response, AppError> {
    export(ExportFormat::Csv, &query)
}

/// Download the filtered set as a spreadsheet.
///
/// GET /export/xlsx
#[instrument(skip_all)]
pub async fn export_xlsx(
    RequireAuth(_user): RequireAuth,
    Query(query): Query<FilterQuery>,
) -> Result<Response, AppError> {
    export(ExportFormat::Xlsx, &query)
}

fn export(format: ExportFormat, query: &FilterQuery) -> Result<Response, AppError> {
    let filtered = query.to_filter().apply(&dashboard_products());
    let body = format.render(&filtered)?;

    tracing::info!(rows = filtered.len(), file = format.file_name(), "Export generated");

    Ok((
        StatusCode::OK,
        [
            ("Content-Type", format.content_type()),
            (
                "Content-Disposition",
                &format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        body,
    )
        .into_response())
}

/// Accept a sales data upload.
///
/// The file is read and acknowledged but not ingested; the dashboard keeps
/// showing the synthetic set.
///
/// POST /overview/upload
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn upload(
    RequireAuth(user): RequireAuth,
    session: Session,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut uploaded = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload.csv").to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
        uploaded = Some((name, bytes));
    }

    let flash = match uploaded {
        Some((name, bytes)) if !bytes.is_empty() => {
            let rows = data_rows(&bytes);
            tracing::info!(file = %name, rows, "Sales data uploaded");
            Flash::success(format!("Uploaded: {name} ({rows} rows)"))
        }
        _ => Flash::warning("Please choose a CSV file to upload"),
    };

    set_flash(&session, flash).await?;
    set_page(&session, Page::Overview).await?;
    Ok(Redirect::to("/"))
}

/// Non-blank lines after the header row.
fn data_rows(bytes: &[u8]) -> usize {
    String::from_utf8_lossy(bytes)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count()
        .saturating_sub(1)
}

/// Refresh predictions.
///
/// POST /overview/refresh
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn refresh(
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Redirect, AppError> {
    set_flash(&session, Flash::success("Predictions refreshed successfully!")).await?;
    set_page(&session, Page::Overview).await?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dynamic_pricing_core::{UserId, Username};

    use super::*;

    fn query(sku: &str, lo: &str, hi: &str) -> FilterQuery {
        FilterQuery {
            sku: Some(sku.to_string()),
            margin_min: Some(lo.to_string()),
            margin_max: Some(hi.to_string()),
        }
    }

    #[test]
    fn test_blank_bounds_use_defaults() {
        assert_eq!(query("", "", " ").to_filter(), ProductFilter::default());
        assert_eq!(
            query("", "abc", "0.6").to_filter(),
            ProductFilter::default()
        );
        assert_eq!(FilterQuery::default().to_filter(), ProductFilter::default());
    }

    #[test]
    fn test_data_rows_skips_header_and_blanks() {
        assert_eq!(data_rows(b"sku,qty\nA,1\n\nB,2\n"), 2);
        assert_eq!(data_rows(b"sku,qty\n"), 0);
        assert_eq!(data_rows(b""), 0);
    }

    #[test]
    fn test_overview_view() {
        let user = CurrentUser {
            id: UserId::new(1),
            username: Username::parse("alice").unwrap(),
        };
        let view = OverviewTemplate::build(user, None, &query("", "0", "1"));

        assert_eq!(view.stats.len(), 4);
        assert_eq!(view.stats[0].value, "100");
        assert_eq!(view.filtered_count, 100);
        assert_eq!(view.top_products.len(), TOP_SELLING_COUNT);
        assert_eq!(view.quantity_bars[0].width, "100.0");
        assert_eq!(view.price_bars.len(), PRICE_CHART_COUNT);
        assert_eq!(view.margin_min, "0.00");
    }

    #[test]
    fn test_bound_inputs_echo_exact_filter() {
        let user = CurrentUser {
            id: UserId::new(1),
            username: Username::parse("alice").unwrap(),
        };
        let page_query = query("", "0.205", "0.6");
        let view = OverviewTemplate::build(user, None, &page_query);

        assert_eq!(view.margin_min, "0.205");
        assert_eq!(view.margin_max, "0.60");

        let export_query = query(&view.sku, &view.margin_min, &view.margin_max);
        assert_eq!(export_query.to_filter(), page_query.to_filter());
    }

    #[test]
    fn test_stat_cards_ignore_filter() {
        let user = CurrentUser {
            id: UserId::new(1),
            username: Username::parse("bob").unwrap(),
        };
        let view = OverviewTemplate::build(user, None, &query("no-such-sku", "0", "1"));

        assert_eq!(view.stats[0].value, "100");
        assert_eq!(view.filtered_count, 0);
        assert!(view.top_products.is_empty());
        assert!(view.price_bars.is_empty());
    }
}
