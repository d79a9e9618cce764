use std::collections::BTreeMap;
use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dataset::IndexedDataset;
use crate::error::SalesAnalyticsError;
use crate::fiscal;
use crate::pipeline;
use crate::queries::QueryOutput;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::SalesResult;

/// Gross sales of a customer set for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyGrossSales {
    /// First day of the month
    pub month: NaiveDate,
    pub fiscal_year: i32,
    pub gross_price_total: Money,
}

/// Gross sales of a customer for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyGrossSales {
    pub fiscal_year: i32,
    pub gross_price_total: Money,
}

/// Month-by-month gross sales for the given customer codes, oldest first.
pub fn monthly_gross_sales(
    data: &IndexedDataset<'_>,
    customer_codes: &[String],
) -> SalesResult<ComputationOutput<QueryOutput<MonthlyGrossSales>>> {
    if customer_codes.is_empty() {
        return Err(SalesAnalyticsError::invalid(
            "customer_codes",
            "at least one customer code is required",
        ));
    }
    let start = Instant::now();

    let batch = pipeline::compute_gross_where(data.sales, &data.dimensions, &data.lookups, |s| {
        customer_codes.contains(&s.customer_code)
    });

    let mut months: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for m in &batch.derived {
        *months.entry(fiscal::month_start(m.date)?).or_default() += m.gross_price_total;
    }

    let rows: Vec<MonthlyGrossSales> = months
        .into_iter()
        .map(|(month, gross_price_total)| MonthlyGrossSales {
            month,
            fiscal_year: fiscal::fiscal_year(month),
            gross_price_total,
        })
        .collect();

    let warnings = batch.warnings();
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Gross price total summed per calendar month",
        &serde_json::json!({ "customer_codes": customer_codes }),
        warnings,
        elapsed,
        QueryOutput::new(rows, batch),
    ))
}

/// Fiscal-year gross sales for one customer code, oldest first.
pub fn yearly_gross_sales(
    data: &IndexedDataset<'_>,
    customer_code: &str,
) -> SalesResult<ComputationOutput<QueryOutput<YearlyGrossSales>>> {
    let start = Instant::now();

    let batch = pipeline::compute_gross_where(data.sales, &data.dimensions, &data.lookups, |s| {
        s.customer_code == customer_code
    });

    let mut years: BTreeMap<i32, Money> = BTreeMap::new();
    for m in &batch.derived {
        *years.entry(m.fiscal_year).or_default() += m.gross_price_total;
    }

    let rows: Vec<YearlyGrossSales> = years
        .into_iter()
        .map(|(fiscal_year, gross_price_total)| YearlyGrossSales {
            fiscal_year,
            gross_price_total,
        })
        .collect();

    let warnings = batch.warnings();
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Gross price total summed per fiscal year",
        &serde_json::json!({ "customer_code": customer_code }),
        warnings,
        elapsed,
        QueryOutput::new(rows, batch),
    ))
}
