use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::dataset::IndexedDataset;
use crate::error::SalesAnalyticsError;
use crate::fiscal;
use crate::pipeline;
use crate::queries::in_market;
use crate::types::{with_metadata, ComputationOutput, Quantity};
use crate::SalesResult;

/// Markets selling strictly more than this many units in a year are Gold.
pub const GOLD_THRESHOLD_UNITS: Quantity = 5_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    Gold,
    Silver,
}

impl Badge {
    pub fn for_quantity(total_sold_quantity: Quantity) -> Self {
        if total_sold_quantity > GOLD_THRESHOLD_UNITS {
            Badge::Gold
        } else {
            Badge::Silver
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketBadge {
    pub market: String,
    pub fiscal_year: i32,
    pub total_sold_quantity: Quantity,
    pub badge: Badge,
    pub skipped_records: usize,
}

/// Badge a market by the quantity it sold in a fiscal year.
pub fn market_badge(
    data: &IndexedDataset<'_>,
    market: &str,
    fiscal_year: i32,
) -> SalesResult<ComputationOutput<MarketBadge>> {
    let start = Instant::now();

    let has_sales = data
        .sales
        .iter()
        .any(|s| fiscal::is_in_fiscal_year(s.date, fiscal_year) && in_market(data, s, market));
    if !has_sales {
        return Err(SalesAnalyticsError::not_found(
            "fact_sales",
            format!("market={market}, fiscal_year={fiscal_year}"),
        ));
    }

    let batch = pipeline::derive_where(
        data.sales,
        |s| fiscal::is_in_fiscal_year(s.date, fiscal_year) && in_market(data, s, market),
        |s| pipeline::resolve_quantity(s, &data.dimensions),
    );
    let total_sold_quantity = batch
        .derived
        .iter()
        .try_fold(0 as Quantity, |acc, &qty| acc.checked_add(qty))
        .ok_or_else(|| {
            SalesAnalyticsError::invalid("sold_quantity", "market total overflows a 64-bit count")
        })?;

    let output = MarketBadge {
        market: market.to_string(),
        fiscal_year,
        total_sold_quantity,
        badge: Badge::for_quantity(total_sold_quantity),
        skipped_records: batch.skipped(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Gold when total quantity sold exceeds the threshold, otherwise Silver",
        &serde_json::json!({
            "market": market,
            "fiscal_year": fiscal_year,
            "gold_threshold_units": GOLD_THRESHOLD_UNITS,
        }),
        batch.warnings(),
        elapsed,
        output,
    ))
}
