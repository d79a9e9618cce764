mod common;

use common::{date, seed};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sales_analytics_core::fiscal;
use sales_analytics_core::lookups::PriceSource;
use sales_analytics_core::pipeline;
use sales_analytics_core::queries;
use sales_analytics_core::SalesAnalyticsError;

// ---------------------------------------------------------------------------
// Fiscal year
// ---------------------------------------------------------------------------

#[test]
fn test_fiscal_year_reference_dates() {
    assert_eq!(fiscal::fiscal_year(date(2024, 9, 30)), 2024);
    assert_eq!(fiscal::fiscal_year(date(2024, 10, 1)), 2025);
    assert_eq!(fiscal::fiscal_year(date(2024, 1, 1)), 2024);
}

// ---------------------------------------------------------------------------
// Price lookup
// ---------------------------------------------------------------------------

#[test]
fn test_unit_price_matches_every_entry() {
    let data = seed();
    let indexed = data.index().unwrap();
    for entry in &data.gross_prices {
        assert_eq!(
            indexed
                .lookups
                .unit_price(&entry.product_code, entry.fiscal_year)
                .unwrap(),
            entry.gross_price
        );
    }
}

#[test]
fn test_unit_price_absent_key_not_found() {
    let data = seed();
    let indexed = data.index().unwrap();
    let err = indexed.lookups.unit_price("P5", 2022).unwrap_err();
    assert!(matches!(err, SalesAnalyticsError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

#[test]
fn test_first_sale_gross_total() {
    let data = seed();
    let indexed = data.index().unwrap();
    let batch = pipeline::compute_metrics(indexed.sales, &indexed.dimensions, &indexed.lookups);

    let first = &batch.derived[0];
    assert_eq!(first.sold_quantity, 50);
    assert_eq!(first.gross_price, dec!(1500.00));
    assert_eq!(first.gross_price_total, dec!(75000.00));
    assert_eq!(first.net_invoice_sales, dec!(71250));
    assert_eq!(first.net_sales, dec!(67687.5));
}

#[test]
fn test_fy2022_uses_fy2022_price_and_discounts() {
    let data = seed();
    let indexed = data.index().unwrap();
    let batch = pipeline::compute_metrics(indexed.sales, &indexed.dimensions, &indexed.lookups);

    let m = batch
        .derived
        .iter()
        .find(|m| m.date == date(2021, 10, 5))
        .unwrap();
    assert_eq!(m.fiscal_year, 2022);
    assert_eq!(m.gross_price_total, dec!(32000));
    assert_eq!(m.net_invoice_sales, dec!(30080));
    assert_eq!(m.net_sales, dec!(28876.8));
}

#[test]
fn test_failures_are_attributed_and_counted() {
    let data = seed();
    let indexed = data.index().unwrap();
    let batch = pipeline::compute_metrics(indexed.sales, &indexed.dimensions, &indexed.lookups);

    assert_eq!(batch.derived.len(), 8);
    assert_eq!(batch.skipped(), 2);

    let walmart = &batch.failures[0];
    assert_eq!(walmart.index, 5);
    assert_eq!(walmart.sale.customer_code, "C5");
    assert_eq!(
        walmart.error,
        SalesAnalyticsError::NotFound {
            table: "pre_invoice_deductions".into(),
            key: "customer_code=C5, fiscal_year=2021".into(),
        }
    );

    let fy2020 = &batch.failures[1];
    assert_eq!(fy2020.index, 8);
    assert!(
        matches!(fy2020.error, SalesAnalyticsError::NotFound { ref table, .. } if table == "gross_price")
    );
}

#[test]
fn test_compute_metrics_is_idempotent() {
    let data = seed();
    let indexed = data.index().unwrap();
    let first = queries::compute_metrics(&indexed);
    let second = queries::compute_metrics(&indexed);
    assert_eq!(first.result, second.result);
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn test_compute_metrics_envelope_reports_skips() {
    let data = seed();
    let indexed = data.index().unwrap();
    let out = queries::compute_metrics(&indexed);
    assert_eq!(out.warnings, vec!["2 sale record(s) skipped: NotFound".to_string()]);
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}

#[test]
fn test_dataset_round_trips_through_json() {
    let data = seed();
    let json = serde_json::to_string(&data).unwrap();
    let parsed: sales_analytics_core::dataset::SalesDataset = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.sales, data.sales);
    assert_eq!(parsed.gross_prices, data.gross_prices);
}

#[test]
fn test_duplicate_dimension_rejected_at_index_time() {
    let mut data = seed();
    let dup = data.customers[0].clone();
    data.customers.push(dup);
    assert!(matches!(
        data.index().unwrap_err(),
        SalesAnalyticsError::InvalidInput { .. }
    ));
}
