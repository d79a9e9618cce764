mod common;

use common::seed;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sales_analytics_core::queries::{
    self, CustomerNetSales, DivisionProductRank, MarketNetSales,
};
use sales_analytics_core::SalesAnalyticsError;

fn rank(division: &str, product: &str, qty: i64, drank: u32) -> DivisionProductRank {
    DivisionProductRank {
        division: division.into(),
        product: product.into(),
        total_sold_quantity: qty,
        drank,
    }
}

// ---------------------------------------------------------------------------
// Markets
// ---------------------------------------------------------------------------

#[test]
fn test_top_markets_fy2021() {
    let data = seed();
    let indexed = data.index().unwrap();
    let out = queries::top_n_by_market(&indexed, 2021, 3).unwrap();

    assert_eq!(
        out.result.rows,
        vec![
            MarketNetSales { market: "USA".into(), net_sales_mln: dec!(2.40) },
            MarketNetSales { market: "India".into(), net_sales_mln: dec!(0.99) },
            MarketNetSales { market: "Japan".into(), net_sales_mln: dec!(0.42) },
        ]
    );
    // Walmart's FY2021 sale has no pre-invoice deduction
    assert_eq!(out.result.skipped_records, 1);
    assert_eq!(out.result.derived_records, 7);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_top_markets_prefix_monotonic() {
    let data = seed();
    let indexed = data.index().unwrap();
    let all = queries::top_n_by_market(&indexed, 2021, 10).unwrap().result.rows;
    for n in 1..=all.len() {
        let top = queries::top_n_by_market(&indexed, 2021, n).unwrap().result.rows;
        assert_eq!(top[..], all[..n]);
    }
}

#[test]
fn test_top_markets_zero_n_fails_whole_call() {
    let data = seed();
    let indexed = data.index().unwrap();
    let err = queries::top_n_by_market(&indexed, 2021, 0).unwrap_err();
    assert!(matches!(err, SalesAnalyticsError::InvalidInput { ref field, .. } if field == "n"));
}

#[test]
fn test_top_markets_year_without_sales_is_empty() {
    let data = seed();
    let indexed = data.index().unwrap();
    let out = queries::top_n_by_market(&indexed, 2030, 5).unwrap();
    assert!(out.result.rows.is_empty());
    assert_eq!(out.result.skipped_records, 0);
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[test]
fn test_top_customers_india() {
    let data = seed();
    let indexed = data.index().unwrap();
    let out = queries::top_n_customers(&indexed, "India", 2021, 5).unwrap();
    assert_eq!(
        out.result.rows,
        vec![
            CustomerNetSales { customer: "Amazon".into(), net_sales_mln: dec!(0.90) },
            CustomerNetSales { customer: "Croma".into(), net_sales_mln: dec!(0.09) },
        ]
    );
    assert_eq!(out.result.skipped_records, 0);
}

#[test]
fn test_top_customers_usa_excludes_failed_record() {
    let data = seed();
    let indexed = data.index().unwrap();
    let out = queries::top_n_customers(&indexed, "USA", 2021, 5).unwrap();
    assert_eq!(
        out.result.rows,
        vec![CustomerNetSales { customer: "Amazon".into(), net_sales_mln: dec!(2.40) }]
    );
    assert_eq!(out.result.skipped_records, 1);
    assert_eq!(out.result.failures[0].sale.customer_code, "C5");
}

#[test]
fn test_top_customers_limits_to_n() {
    let data = seed();
    let indexed = data.index().unwrap();
    let out = queries::top_n_customers(&indexed, "India", 2021, 1).unwrap();
    assert_eq!(out.result.rows.len(), 1);
    assert_eq!(out.result.rows[0].customer, "Amazon");
}

// ---------------------------------------------------------------------------
// Products per division
// ---------------------------------------------------------------------------

#[test]
fn test_top_products_tie_inflates_result() {
    let data = seed();
    let indexed = data.index().unwrap();
    let out = queries::top_n_products_per_division(&indexed, 2021, 1).unwrap();
    assert_eq!(
        out.result.rows,
        vec![
            rank("N & S", "AQ Wi Power", 1000, 1),
            rank("P & A", "AQ Mforce Gen X", 100, 1),
            rank("PC", "AQ Digit", 4000, 1),
            rank("PC", "AQ Gamers", 4000, 1),
        ]
    );
}

#[test]
fn test_top_products_second_rank_follows_tie_without_gap() {
    let data = seed();
    let indexed = data.index().unwrap();
    let out = queries::top_n_products_per_division(&indexed, 2021, 2).unwrap();
    let pc: Vec<&DivisionProductRank> =
        out.result.rows.iter().filter(|r| r.division == "PC").collect();
    assert_eq!(pc.len(), 3);
    assert_eq!(pc[2].product, "AQ Velocity");
    assert_eq!(pc[2].drank, 2);

    // Walmart's 999 units of AQ Dracula HDD never reach the total
    let dracula = out
        .result
        .rows
        .iter()
        .find(|r| r.product == "AQ Dracula HDD")
        .unwrap();
    assert_eq!(dracula.total_sold_quantity, 50);
    assert_eq!(dracula.drank, 2);
}

#[test]
fn test_top_products_zero_n_rejected() {
    let data = seed();
    let indexed = data.index().unwrap();
    assert!(queries::top_n_products_per_division(&indexed, 2021, 0).is_err());
}
