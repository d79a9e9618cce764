//! Dataset-level queries: metric derivation and the three top-N rankings.
//!
//! Every query derives its records fresh from the indexed snapshot. Sales
//! that fail derivation are excluded from totals and reported in the output
//! as `skipped_records` plus the individual failures.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::dataset::IndexedDataset;
use crate::dimensions::DimensionSource;
use crate::fiscal;
use crate::pipeline::{self, Batch, MetricsBatch, RecordFailure, Sale};
use crate::ranking::dense_rank::dense_rank_top_n;
use crate::ranking::top_n::top_n_by;
use crate::ranking::validate_n;
use crate::types::{with_metadata, ComputationOutput, Money, Quantity};
use crate::SalesResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketNetSales {
    pub market: String,
    pub net_sales_mln: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerNetSales {
    pub customer: String,
    pub net_sales_mln: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionProductRank {
    pub division: String,
    pub product: String,
    pub total_sold_quantity: Quantity,
    pub drank: u32,
}

/// Ranked rows plus an explicit account of records left out of the totals.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput<T> {
    pub rows: Vec<T>,
    pub derived_records: usize,
    pub skipped_records: usize,
    pub failures: Vec<RecordFailure>,
}

impl<T> QueryOutput<T> {
    pub(crate) fn new<R>(rows: Vec<T>, batch: Batch<R>) -> Self {
        QueryOutput {
            rows,
            derived_records: batch.derived.len(),
            skipped_records: batch.failures.len(),
            failures: batch.failures,
        }
    }
}

// ---------------------------------------------------------------------------
// Scoping
// ---------------------------------------------------------------------------

/// Derive the sales of one fiscal year accepted by `include`.
pub(crate) fn derive_fiscal_year<F>(
    data: &IndexedDataset<'_>,
    fiscal_year: i32,
    include: F,
) -> MetricsBatch
where
    F: Fn(&Sale) -> bool,
{
    pipeline::compute_metrics_where(data.sales, &data.dimensions, &data.lookups, |s| {
        fiscal::is_in_fiscal_year(s.date, fiscal_year) && include(s)
    })
}

/// True when the sale's customer resolves and belongs to `market`.
/// Sales of unknown customers cannot be attributed to any market.
pub(crate) fn in_market(data: &IndexedDataset<'_>, sale: &Sale, market: &str) -> bool {
    data.dimensions
        .customer(&sale.customer_code)
        .map(|c| c.market == market)
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Derive every sale in the dataset.
pub fn compute_metrics(data: &IndexedDataset<'_>) -> ComputationOutput<MetricsBatch> {
    let start = Instant::now();
    let batch = pipeline::compute_metrics(data.sales, &data.dimensions, &data.lookups);
    let warnings = batch.warnings();

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Gross -> net invoice -> net sales derivation (percentages applied as pct / 100)",
        &serde_json::json!({
            "sales": data.sales.len(),
            "gross_price_total_rounding": "2dp, half away from zero",
        }),
        warnings,
        elapsed,
        batch,
    )
}

/// Top N markets by net sales (millions) for a fiscal year.
pub fn top_n_by_market(
    data: &IndexedDataset<'_>,
    fiscal_year: i32,
    n: usize,
) -> SalesResult<ComputationOutput<QueryOutput<MarketNetSales>>> {
    validate_n(n)?;
    let start = Instant::now();
    tracing::debug!(fiscal_year, n, "top markets by net sales");

    let batch = derive_fiscal_year(data, fiscal_year, |_| true);
    let ranked = top_n_by(&batch.derived, |m| m.market.as_str(), |m| m.net_sales, n)?;
    let rows: Vec<MarketNetSales> = ranked
        .into_iter()
        .map(|r| MarketNetSales {
            market: r.key,
            net_sales_mln: r.total_mln,
        })
        .collect();

    let warnings = batch.warnings();
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Top-N markets by summed net sales, scaled to millions",
        &serde_json::json!({ "fiscal_year": fiscal_year, "n": n }),
        warnings,
        elapsed,
        QueryOutput::new(rows, batch),
    ))
}

/// Top N customers of one market by net sales (millions) for a fiscal year.
pub fn top_n_customers(
    data: &IndexedDataset<'_>,
    market: &str,
    fiscal_year: i32,
    n: usize,
) -> SalesResult<ComputationOutput<QueryOutput<CustomerNetSales>>> {
    validate_n(n)?;
    let start = Instant::now();
    tracing::debug!(market, fiscal_year, n, "top customers by net sales");

    let batch = derive_fiscal_year(data, fiscal_year, |s| in_market(data, s, market));
    let ranked = top_n_by(&batch.derived, |m| m.customer.as_str(), |m| m.net_sales, n)?;
    let rows: Vec<CustomerNetSales> = ranked
        .into_iter()
        .map(|r| CustomerNetSales {
            customer: r.key,
            net_sales_mln: r.total_mln,
        })
        .collect();

    let warnings = batch.warnings();
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Top-N customers within a market by summed net sales, scaled to millions",
        &serde_json::json!({ "market": market, "fiscal_year": fiscal_year, "n": n }),
        warnings,
        elapsed,
        QueryOutput::new(rows, batch),
    ))
}

/// Products with dense rank <= N by quantity sold, per division.
pub fn top_n_products_per_division(
    data: &IndexedDataset<'_>,
    fiscal_year: i32,
    n: usize,
) -> SalesResult<ComputationOutput<QueryOutput<DivisionProductRank>>> {
    validate_n(n)?;
    let start = Instant::now();
    tracing::debug!(fiscal_year, n, "top products per division by quantity");

    let batch = derive_fiscal_year(data, fiscal_year, |_| true);
    let rows: Vec<DivisionProductRank> = dense_rank_top_n(
        &batch.derived,
        |m| m.division.as_str(),
        |m| m.product.as_str(),
        |m| m.sold_quantity,
        n,
    )?
    .into_iter()
    .map(|r| DivisionProductRank {
        division: r.partition,
        product: r.key,
        total_sold_quantity: r.total,
        drank: r.rank,
    })
    .collect();

    let warnings = batch.warnings();
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Dense rank of products by summed quantity within each division",
        &serde_json::json!({ "fiscal_year": fiscal_year, "n": n }),
        warnings,
        elapsed,
        QueryOutput::new(rows, batch),
    ))
}
