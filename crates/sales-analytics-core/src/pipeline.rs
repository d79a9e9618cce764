//! Sale → derived profitability metrics.
//!
//! Each sale line is resolved in a fixed order: fiscal year, unit gross
//! price, pre-invoice discount, post-invoice deductions. The first missing
//! dependency aborts that one record and is reported against it; other
//! records are unaffected.
//!
//! Gross-only reports stop after the price lookup ([`compute_gross_where`]),
//! and quantity totals need only the dimensions ([`resolve_quantity`]), so a
//! missing deduction row never hides gross sales or units sold.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::dimensions::{Customer, DimensionSource, Product};
use crate::error::SalesAnalyticsError;
use crate::fiscal;
use crate::lookups::{DiscountSource, PriceSource};
use crate::types::{percent_to_rate, round_half_up, Money, Percent, Quantity};
use crate::SalesResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw sale fact as delivered by the loading layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub date: NaiveDate,
    /// Pre-stamped fiscal year; recomputed from `date` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<i32>,
    pub customer_code: String,
    pub product_code: String,
    pub sold_quantity: Quantity,
    /// Line total carried by the source, if any. Always recomputed on derivation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_price_total: Option<Money>,
}

/// A sale with every derived figure resolved. Produced fresh per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSaleMetric {
    pub date: NaiveDate,
    pub fiscal_year: i32,
    pub customer_code: String,
    pub customer: String,
    pub market: String,
    pub region: String,
    pub product_code: String,
    pub product: String,
    pub variant: String,
    pub division: String,
    pub sold_quantity: Quantity,
    /// Unit gross price for the fiscal year
    pub gross_price: Money,
    /// round(sold_quantity * gross_price, 2)
    pub gross_price_total: Money,
    pub pre_invoice_discount_pct: Percent,
    /// gross_price_total * (1 - pre_invoice_discount_pct / 100)
    pub net_invoice_sales: Money,
    /// discounts_pct + other_deductions_pct
    pub post_invoice_discount_pct: Percent,
    /// net_invoice_sales * (1 - post_invoice_discount_pct / 100)
    pub net_sales: Money,
}

/// Gross figures of a sale: price resolved, no deductions applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrossSaleLine {
    pub date: NaiveDate,
    pub fiscal_year: i32,
    pub customer_code: String,
    pub product_code: String,
    pub sold_quantity: Quantity,
    pub gross_price: Money,
    pub gross_price_total: Money,
}

/// A sale that could not be derived, with its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFailure {
    pub index: usize,
    pub sale: Sale,
    #[serde(serialize_with = "serialize_error")]
    pub error: SalesAnalyticsError,
}

/// Successful derivations and per-record failures, both in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch<T> {
    pub derived: Vec<T>,
    pub failures: Vec<RecordFailure>,
}

pub type MetricsBatch = Batch<DerivedSaleMetric>;
pub type GrossBatch = Batch<GrossSaleLine>;

impl<T> Default for Batch<T> {
    fn default() -> Self {
        Batch {
            derived: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> Batch<T> {
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }

    /// Failure counts keyed by error kind.
    pub fn failure_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for f in &self.failures {
            *counts.entry(f.error.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// One warning line per failure kind, for output envelopes.
    pub fn warnings(&self) -> Vec<String> {
        self.failure_counts()
            .into_iter()
            .map(|(kind, n)| format!("{n} sale record(s) skipped: {kind}"))
            .collect()
    }
}

fn serialize_error<S: Serializer>(error: &SalesAnalyticsError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&error.to_string())
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Fiscal year of a sale. A pre-stamped value must agree with its date.
pub fn resolve_fiscal_year(sale: &Sale) -> SalesResult<i32> {
    let computed = fiscal::fiscal_year(sale.date);
    match sale.fiscal_year {
        Some(stamped) if !fiscal::is_in_fiscal_year(sale.date, stamped) => {
            Err(SalesAnalyticsError::invalid(
                "fiscal_year",
                format!(
                    "stamped {stamped} but {} falls in fiscal year {computed}",
                    sale.date
                ),
            ))
        }
        _ => Ok(computed),
    }
}

/// Check a sale against the dimension rows it was paired with and return
/// its fiscal year.
fn validate_sale(sale: &Sale, product: &Product, customer: &Customer) -> SalesResult<i32> {
    if sale.sold_quantity <= 0 {
        return Err(SalesAnalyticsError::invalid(
            "sold_quantity",
            format!("must be positive, got {}", sale.sold_quantity),
        ));
    }
    if product.product_code != sale.product_code {
        return Err(SalesAnalyticsError::invalid(
            "product",
            format!(
                "sale references {} but product {} was supplied",
                sale.product_code, product.product_code
            ),
        ));
    }
    if customer.customer_code != sale.customer_code {
        return Err(SalesAnalyticsError::invalid(
            "customer",
            format!(
                "sale references {} but customer {} was supplied",
                sale.customer_code, customer.customer_code
            ),
        ));
    }
    resolve_fiscal_year(sale)
}

/// round(quantity * unit price, 2), failing instead of overflowing.
pub fn gross_total(sold_quantity: Quantity, gross_price: Money) -> SalesResult<Money> {
    Decimal::from(sold_quantity)
        .checked_mul(gross_price)
        .map(|total| round_half_up(total, 2))
        .ok_or_else(|| {
            SalesAnalyticsError::invalid(
                "sold_quantity",
                format!("{sold_quantity} x {gross_price} overflows the decimal range"),
            )
        })
}

/// Resolve the unit price and gross line total of a single sale.
pub fn derive_gross<P>(
    sale: &Sale,
    product: &Product,
    customer: &Customer,
    prices: &P,
) -> SalesResult<GrossSaleLine>
where
    P: PriceSource,
{
    let fiscal_year = validate_sale(sale, product, customer)?;
    let gross_price = prices.unit_price(&sale.product_code, fiscal_year)?;
    let gross_price_total = gross_total(sale.sold_quantity, gross_price)?;

    Ok(GrossSaleLine {
        date: sale.date,
        fiscal_year,
        customer_code: sale.customer_code.clone(),
        product_code: sale.product_code.clone(),
        sold_quantity: sale.sold_quantity,
        gross_price,
        gross_price_total,
    })
}

/// Derive the full metric record for a single sale.
pub fn derive<L>(
    sale: &Sale,
    product: &Product,
    customer: &Customer,
    lookups: &L,
) -> SalesResult<DerivedSaleMetric>
where
    L: PriceSource + DiscountSource,
{
    let gross = derive_gross(sale, product, customer, lookups)?;

    let pre_invoice_discount_pct =
        lookups.pre_invoice_discount_pct(&sale.customer_code, gross.fiscal_year)?;
    let net_invoice_sales = gross.gross_price_total
        - percent_to_rate(pre_invoice_discount_pct) * gross.gross_price_total;

    let post_invoice_discount_pct =
        lookups.post_invoice_discount_pct(&sale.customer_code, &sale.product_code, sale.date)?;
    let net_sales =
        net_invoice_sales * (Decimal::ONE - percent_to_rate(post_invoice_discount_pct));

    Ok(DerivedSaleMetric {
        date: gross.date,
        fiscal_year: gross.fiscal_year,
        customer_code: customer.customer_code.clone(),
        customer: customer.customer.clone(),
        market: customer.market.clone(),
        region: customer.region.clone(),
        product_code: product.product_code.clone(),
        product: product.product.clone(),
        variant: product.variant.clone(),
        division: product.division.clone(),
        sold_quantity: gross.sold_quantity,
        gross_price: gross.gross_price,
        gross_price_total: gross.gross_price_total,
        pre_invoice_discount_pct,
        net_invoice_sales,
        post_invoice_discount_pct,
        net_sales,
    })
}

/// Quantity of a sale whose dimensions resolve. No price or deduction lookups.
pub fn resolve_quantity<D>(sale: &Sale, dimensions: &D) -> SalesResult<Quantity>
where
    D: DimensionSource,
{
    let product = dimensions.product(&sale.product_code)?;
    let customer = dimensions.customer(&sale.customer_code)?;
    validate_sale(sale, product, customer)?;
    Ok(sale.sold_quantity)
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

/// Run `derive_one` over the sales accepted by `include`. Failure indexes
/// refer to the position in `sales`, not in the filtered subset.
pub fn derive_where<T, F, G>(sales: &[Sale], include: F, derive_one: G) -> Batch<T>
where
    F: Fn(&Sale) -> bool,
    G: Fn(&Sale) -> SalesResult<T>,
{
    let mut batch = Batch::default();

    for (index, sale) in sales.iter().enumerate().filter(|&(_, s)| include(s)) {
        match derive_one(sale) {
            Ok(record) => batch.derived.push(record),
            Err(error) => {
                tracing::warn!(
                    index,
                    customer_code = %sale.customer_code,
                    product_code = %sale.product_code,
                    date = %sale.date,
                    %error,
                    "sale record skipped"
                );
                batch.failures.push(RecordFailure {
                    index,
                    sale: sale.clone(),
                    error,
                });
            }
        }
    }

    batch
}

/// Derive every sale, keeping failures alongside successes in input order.
pub fn compute_metrics<D, L>(sales: &[Sale], dimensions: &D, lookups: &L) -> MetricsBatch
where
    D: DimensionSource,
    L: PriceSource + DiscountSource,
{
    compute_metrics_where(sales, dimensions, lookups, |_| true)
}

/// Derive the full metrics of the sales accepted by `include`.
pub fn compute_metrics_where<D, L, F>(
    sales: &[Sale],
    dimensions: &D,
    lookups: &L,
    include: F,
) -> MetricsBatch
where
    D: DimensionSource,
    L: PriceSource + DiscountSource,
    F: Fn(&Sale) -> bool,
{
    derive_where(sales, include, |sale| {
        let product = dimensions.product(&sale.product_code)?;
        let customer = dimensions.customer(&sale.customer_code)?;
        derive(sale, product, customer, lookups)
    })
}

/// Gross lines of the sales accepted by `include`. Only price lookups can
/// fail here; missing deductions do not affect gross figures.
pub fn compute_gross_where<D, P, F>(
    sales: &[Sale],
    dimensions: &D,
    prices: &P,
    include: F,
) -> GrossBatch
where
    D: DimensionSource,
    P: PriceSource,
    F: Fn(&Sale) -> bool,
{
    derive_where(sales, include, |sale| {
        let product = dimensions.product(&sale.product_code)?;
        let customer = dimensions.customer(&sale.customer_code)?;
        derive_gross(sale, product, customer, prices)
    })
}
