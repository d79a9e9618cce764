#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sales_analytics_core::dataset::SalesDataset;
use sales_analytics_core::dimensions::{Customer, Product};
use sales_analytics_core::lookups::{
    GrossPriceEntry, PostInvoiceDeductionEntry, PreInvoiceDeductionEntry,
};
use sales_analytics_core::pipeline::Sale;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn product(code: &str, name: &str, division: &str) -> Product {
    Product {
        product_code: code.into(),
        product: name.into(),
        variant: "Standard".into(),
        division: division.into(),
    }
}

fn customer(code: &str, name: &str, market: &str, region: &str) -> Customer {
    Customer {
        customer_code: code.into(),
        customer: name.into(),
        market: market.into(),
        region: region.into(),
    }
}

fn price(code: &str, fiscal_year: i32, gross_price: Decimal) -> GrossPriceEntry {
    GrossPriceEntry {
        product_code: code.into(),
        fiscal_year,
        gross_price,
    }
}

fn pre(code: &str, fiscal_year: i32, pct: Decimal) -> PreInvoiceDeductionEntry {
    PreInvoiceDeductionEntry {
        customer_code: code.into(),
        fiscal_year,
        pre_invoice_discount_pct: pct,
    }
}

fn post(
    customer: &str,
    product: &str,
    on: NaiveDate,
    discounts: Decimal,
    other: Decimal,
) -> PostInvoiceDeductionEntry {
    PostInvoiceDeductionEntry {
        customer_code: customer.into(),
        product_code: product.into(),
        date: on,
        discounts_pct: discounts,
        other_deductions_pct: other,
    }
}

fn sale(on: NaiveDate, customer: &str, product: &str, quantity: i64) -> Sale {
    Sale {
        date: on,
        fiscal_year: None,
        customer_code: customer.into(),
        product_code: product.into(),
        sold_quantity: quantity,
        gross_price_total: None,
    }
}

/// Seed dataset. FY2021 net sales by market: USA 2.40m, India 0.99m,
/// Japan 0.42m. Walmart (C5) has no FY2021 pre-invoice deduction, so its
/// sale never reaches a total.
pub fn seed() -> SalesDataset {
    SalesDataset {
        products: vec![
            product("P1", "AQ Dracula HDD", "P & A"),
            product("P2", "AQ Mforce Gen X", "P & A"),
            product("P3", "AQ Gamers", "PC"),
            product("P4", "AQ Digit", "PC"),
            product("P5", "AQ Wi Power", "N & S"),
            product("P6", "AQ Velocity", "PC"),
        ],
        customers: vec![
            customer("C1", "Croma", "India", "APAC"),
            customer("C2", "Amazon", "India", "APAC"),
            customer("C3", "Amazon", "USA", "NA"),
            customer("C4", "Atliq Exclusive", "Japan", "APAC"),
            customer("C5", "Walmart", "USA", "NA"),
        ],
        gross_prices: vec![
            price("P1", 2021, dec!(1500.00)),
            price("P2", 2021, dec!(200.00)),
            price("P3", 2021, dec!(1000.00)),
            price("P4", 2021, dec!(100.00)),
            price("P5", 2021, dec!(100.00)),
            price("P6", 2021, dec!(50.00)),
            price("P1", 2022, dec!(1600.00)),
        ],
        pre_invoice_deductions: vec![
            pre("C1", 2021, dec!(5.00)),
            pre("C2", 2021, dec!(10.00)),
            pre("C3", 2021, dec!(20.00)),
            pre("C4", 2021, dec!(0.00)),
            pre("C1", 2022, dec!(6.00)),
        ],
        post_invoice_deductions: vec![
            post("C1", "P1", date(2020, 10, 1), dec!(2.00), dec!(3.00)),
            post("C2", "P3", date(2020, 11, 1), dec!(7.00), dec!(3.00)),
            post("C3", "P3", date(2020, 11, 1), dec!(0.00), dec!(0.00)),
            post("C4", "P4", date(2021, 1, 1), dec!(0.00), dec!(0.00)),
            post("C1", "P2", date(2021, 2, 1), dec!(0.00), dec!(0.00)),
            post("C5", "P1", date(2021, 3, 1), dec!(1.00), dec!(1.00)),
            post("C2", "P5", date(2021, 3, 1), dec!(0.00), dec!(0.00)),
            post("C4", "P6", date(2021, 4, 1), dec!(0.00), dec!(0.00)),
            post("C1", "P1", date(2021, 10, 5), dec!(4.00), dec!(0.00)),
        ],
        sales: vec![
            // FY2021
            sale(date(2020, 10, 1), "C1", "P1", 50),
            sale(date(2020, 11, 1), "C2", "P3", 1000),
            sale(date(2020, 11, 1), "C3", "P3", 3000),
            sale(date(2021, 1, 1), "C4", "P4", 4000),
            sale(date(2021, 2, 1), "C1", "P2", 100),
            sale(date(2021, 3, 1), "C5", "P1", 999),
            sale(date(2021, 3, 1), "C2", "P5", 1000),
            sale(date(2021, 4, 1), "C4", "P6", 300),
            // FY2020, no price on file
            sale(date(2020, 9, 30), "C1", "P1", 10),
            // FY2022
            sale(date(2021, 10, 5), "C1", "P1", 20),
        ],
    }
}
