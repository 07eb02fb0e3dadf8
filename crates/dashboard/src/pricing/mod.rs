//! Synthetic pricing data and the filters applied to it.
//!
//! Products are regenerated from a fixed seed on every render; nothing here
//! touches the database. All operations are linear scans over at most a few
//! hundred rows.

pub mod export;
pub mod format;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub use export::{ExportError, ExportFormat};

/// Seed used by the dashboard.
pub const DEFAULT_SEED: u64 = 42;

/// Number of products generated for the dashboard.
pub const DEFAULT_PRODUCT_COUNT: usize = 100;

/// Default lower margin bound.
pub const DEFAULT_MARGIN_MIN: f64 = 0.2;

/// Default upper margin bound.
pub const DEFAULT_MARGIN_MAX: f64 = 0.6;

/// Rows shown in the top-selling list.
pub const TOP_SELLING_COUNT: usize = 10;

/// Rows shown in the price distribution chart.
pub const PRICE_CHART_COUNT: usize = 20;

const FIRST_SKU_NUMBER: usize = 1000;

/// One synthetic product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub total_quantity: u32,
    pub suggested_price: f64,
    /// `total_quantity * suggested_price`.
    pub total_sales: f64,
    pub cost: f64,
    /// `(suggested_price - cost) / suggested_price`.
    pub margin: f64,
}

impl Product {
    /// Build a row, deriving `total_sales` and `margin`.
    #[must_use]
    pub fn new(sku: String, total_quantity: u32, suggested_price: f64, cost: f64) -> Self {
        let total_sales = f64::from(total_quantity) * suggested_price;
        let margin = (suggested_price - cost) / suggested_price;
        Self {
            sku,
            total_quantity,
            suggested_price,
            total_sales,
            cost,
            margin,
        }
    }
}

/// Generate `count` products from `seed`.
///
/// Same seed, same rows. Columns are drawn one at a time (all quantities,
/// then all prices, then all cost factors):
/// - quantity: integer in `[10, 1000)`
/// - price: `[100, 2000)`
/// - cost: price times a factor in `[0.5, 0.8)`
#[must_use]
pub fn generate_products(seed: u64, count: usize) -> Vec<Product> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let quantities: Vec<u32> = (0..count).map(|_| rng.random_range(10..1000)).collect();
    let prices: Vec<f64> = (0..count).map(|_| rng.random_range(100.0..2000.0)).collect();
    let cost_factors: Vec<f64> = (0..count).map(|_| rng.random_range(0.5..0.8)).collect();

    quantities
        .into_iter()
        .zip(prices)
        .zip(cost_factors)
        .enumerate()
        .map(|(i, ((quantity, price), factor))| {
            Product::new(
                format!("SKU-{}", FIRST_SKU_NUMBER + i),
                quantity,
                price,
                price * factor,
            )
        })
        .collect()
}

/// The dashboard's product set (seed 42, 100 rows).
#[must_use]
pub fn dashboard_products() -> Vec<Product> {
    generate_products(DEFAULT_SEED, DEFAULT_PRODUCT_COUNT)
}

/// SKU substring and margin range filter.
///
/// Always normalised: bounds lie in `[0, 1]` and `margin_min <= margin_max`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    sku: String,
    margin_min: f64,
    margin_max: f64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            sku: String::new(),
            margin_min: DEFAULT_MARGIN_MIN,
            margin_max: DEFAULT_MARGIN_MAX,
        }
    }
}

impl ProductFilter {
    /// Build a filter from raw inputs.
    ///
    /// Missing bounds take the defaults, out-of-range bounds are clamped to
    /// `[0, 1]` and reversed bounds are swapped. The SKU text is trimmed.
    #[must_use]
    pub fn new(sku: Option<&str>, margin_min: Option<f64>, margin_max: Option<f64>) -> Self {
        let lo = normalise_bound(margin_min, DEFAULT_MARGIN_MIN);
        let hi = normalise_bound(margin_max, DEFAULT_MARGIN_MAX);
        let (margin_min, margin_max) = if lo <= hi { (lo, hi) } else { (hi, lo) };

        Self {
            sku: sku.map(str::trim).unwrap_or_default().to_owned(),
            margin_min,
            margin_max,
        }
    }

    #[must_use]
    pub fn sku(&self) -> &str {
        &self.sku
    }

    #[must_use]
    pub const fn margin_min(&self) -> f64 {
        self.margin_min
    }

    #[must_use]
    pub const fn margin_max(&self) -> f64 {
        self.margin_max
    }

    /// Whether a single product passes both filters.
    ///
    /// The SKU match is a case-insensitive substring test; an empty SKU
    /// matches everything. Both margin bounds are inclusive.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let sku_ok = self.sku.is_empty()
            || product
                .sku
                .to_lowercase()
                .contains(&self.sku.to_lowercase());

        sku_ok && product.margin >= self.margin_min && product.margin <= self.margin_max
    }

    /// Filter a product list, keeping the input order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}

fn normalise_bound(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => default,
    }
}

/// Headline numbers shown in the stat cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_products: usize,
    pub total_revenue: f64,
    pub avg_price: f64,
    pub avg_margin: f64,
}

impl Summary {
    /// Summarise a product list. Averages of an empty list are zero.
    #[must_use]
    pub fn of(products: &[Product]) -> Self {
        let total_products = products.len();
        let total_revenue = products.iter().map(|p| p.total_sales).sum();

        if total_products == 0 {
            return Self {
                total_products,
                total_revenue,
                avg_price: 0.0,
                avg_margin: 0.0,
            };
        }

        #[allow(clippy::cast_precision_loss)] // a few hundred rows
        let n = total_products as f64;
        Self {
            total_products,
            total_revenue,
            avg_price: products.iter().map(|p| p.suggested_price).sum::<f64>() / n,
            avg_margin: products.iter().map(|p| p.margin).sum::<f64>() / n,
        }
    }
}

/// The `n` products with the highest quantity, highest first.
///
/// Ties keep their input order.
#[must_use]
pub fn top_selling(products: &[Product], n: usize) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
    sorted.truncate(n);
    sorted
}
