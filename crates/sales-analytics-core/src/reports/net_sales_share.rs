use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::dataset::IndexedDataset;
use crate::dimensions::DimensionSource;
use crate::queries::{derive_fiscal_year, QueryOutput};
use crate::pipeline::DerivedSaleMetric;
use crate::ranking::top_n::sum_by_key;
use crate::ranking::validate_n;
use crate::types::{round_half_up, to_millions, with_metadata, ComputationOutput, Money, Percent};
use crate::SalesResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerShare {
    pub customer: String,
    pub net_sales_mln: Money,
    /// Share of the filtered total, 0-100, 2 places
    pub pct_share: Percent,
}

/// A customer's share of its region's net sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCustomerShare {
    pub region: String,
    pub customer: String,
    pub net_sales_mln: Money,
    /// Share of the region total, 0-100, 2 places
    pub pct_share: Percent,
}

/// Net sales per customer as a percentage of the fiscal-year total,
/// optionally restricted to one region. Largest share first.
pub fn net_sales_share(
    data: &IndexedDataset<'_>,
    fiscal_year: i32,
    region: Option<&str>,
) -> SalesResult<ComputationOutput<QueryOutput<CustomerShare>>> {
    let start = Instant::now();

    let batch = derive_fiscal_year(data, fiscal_year, |s| match region {
        Some(r) => data
            .dimensions
            .customer(&s.customer_code)
            .map(|c| c.region == r)
            .unwrap_or(false),
        None => true,
    });

    let totals = sum_by_key(&batch.derived, |m| m.customer.as_str(), |m| m.net_sales);
    let rows: Vec<CustomerShare> = rank_shares(totals)
        .into_iter()
        .map(|(customer, net_sales, pct_share)| CustomerShare {
            customer,
            net_sales_mln: to_millions(net_sales),
            pct_share,
        })
        .collect();

    let warnings = batch.warnings();
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Customer net sales as a percentage of the filtered total",
        &serde_json::json!({ "fiscal_year": fiscal_year, "region": region }),
        warnings,
        elapsed,
        QueryOutput::new(rows, batch),
    ))
}

/// Net sales share per customer computed within each region, keeping the
/// top `n` customers of every region. Rows are ordered by region, then by
/// descending share.
pub fn net_sales_share_by_region(
    data: &IndexedDataset<'_>,
    fiscal_year: i32,
    n: usize,
) -> SalesResult<ComputationOutput<QueryOutput<RegionCustomerShare>>> {
    validate_n(n)?;
    let start = Instant::now();

    let batch = derive_fiscal_year(data, fiscal_year, |_| true);

    let mut regions: BTreeMap<&str, Vec<&DerivedSaleMetric>> = BTreeMap::new();
    for metric in &batch.derived {
        regions.entry(metric.region.as_str()).or_default().push(metric);
    }

    let mut rows = Vec::new();
    for (region, metrics) in regions {
        let totals = sum_by_key(&metrics, |m| m.customer.as_str(), |m| m.net_sales);
        for (customer, net_sales, pct_share) in rank_shares(totals).into_iter().take(n) {
            rows.push(RegionCustomerShare {
                region: region.to_string(),
                customer,
                net_sales_mln: to_millions(net_sales),
                pct_share,
            });
        }
    }

    let warnings = batch.warnings();
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Customer net sales as a percentage of the region total, top n per region",
        &serde_json::json!({ "fiscal_year": fiscal_year, "n": n }),
        warnings,
        elapsed,
        QueryOutput::new(rows, batch),
    ))
}

/// Sort customer totals by descending net sales (name ascending on ties)
/// and attach each one's share of the combined total.
fn rank_shares(mut totals: Vec<(String, Money)>) -> Vec<(String, Money, Percent)> {
    totals.sort_by(|a, b| match b.1.cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });

    let grand_total: Money = totals.iter().map(|t| t.1).sum();
    totals
        .into_iter()
        .map(|(customer, net_sales)| {
            let pct = share_pct(net_sales, grand_total);
            (customer, net_sales, pct)
        })
        .collect()
}

fn share_pct(part: Money, total: Money) -> Percent {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        round_half_up(part / total * dec!(100), 2)
    }
}
