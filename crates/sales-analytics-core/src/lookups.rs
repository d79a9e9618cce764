//! Price and deduction lookup tables.
//!
//! Every lookup is an exact composite-key match. A missing key is reported
//! as `NotFound` carrying the key; nothing defaults to zero, since a zero
//! price or discount would flow silently into every downstream total.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SalesAnalyticsError;
use crate::types::{Money, Percent};
use crate::SalesResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Unit gross price of a product for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrossPriceEntry {
    pub product_code: String,
    pub fiscal_year: i32,
    pub gross_price: Money,
}

/// Pre-invoice discount granted to a customer for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreInvoiceDeductionEntry {
    pub customer_code: String,
    pub fiscal_year: i32,
    /// Whole-number percentage, 5.00 = 5%
    pub pre_invoice_discount_pct: Percent,
}

/// Post-invoice deductions for a customer/product on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostInvoiceDeductionEntry {
    pub customer_code: String,
    pub product_code: String,
    pub date: NaiveDate,
    pub discounts_pct: Percent,
    pub other_deductions_pct: Percent,
}

pub trait PriceSource {
    /// Unit gross price for the exact (product, fiscal year) key.
    fn unit_price(&self, product_code: &str, fiscal_year: i32) -> SalesResult<Money>;
}

pub trait DiscountSource {
    /// Pre-invoice discount percentage for the exact (customer, fiscal year) key.
    fn pre_invoice_discount_pct(&self, customer_code: &str, fiscal_year: i32)
        -> SalesResult<Percent>;

    /// Combined post-invoice percentage (discounts + other deductions) for the
    /// exact (customer, product, date) key. No nearest-date fallback.
    fn post_invoice_discount_pct(
        &self,
        customer_code: &str,
        product_code: &str,
        date: NaiveDate,
    ) -> SalesResult<Percent>;
}

// ---------------------------------------------------------------------------
// In-memory tables
// ---------------------------------------------------------------------------

type PostInvoiceKey = (String, String, NaiveDate);

/// Read-only snapshot of the three lookup tables, indexed by composite key.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    gross_prices: HashMap<(String, i32), Money>,
    pre_invoice: HashMap<(String, i32), Percent>,
    post_invoice: HashMap<PostInvoiceKey, (Percent, Percent)>,
}

impl LookupTables {
    /// Index the raw entry lists. At most one entry per composite key.
    pub fn new(
        gross_prices: &[GrossPriceEntry],
        pre_invoice: &[PreInvoiceDeductionEntry],
        post_invoice: &[PostInvoiceDeductionEntry],
    ) -> SalesResult<Self> {
        let mut tables = LookupTables::default();

        for e in gross_prices {
            let key = (e.product_code.clone(), e.fiscal_year);
            if tables.gross_prices.insert(key, e.gross_price).is_some() {
                return Err(duplicate(
                    "gross_prices",
                    price_key(&e.product_code, e.fiscal_year),
                ));
            }
        }

        for e in pre_invoice {
            let key = (e.customer_code.clone(), e.fiscal_year);
            if tables
                .pre_invoice
                .insert(key, e.pre_invoice_discount_pct)
                .is_some()
            {
                return Err(duplicate(
                    "pre_invoice_deductions",
                    pre_invoice_key(&e.customer_code, e.fiscal_year),
                ));
            }
        }

        for e in post_invoice {
            let key = (e.customer_code.clone(), e.product_code.clone(), e.date);
            let pcts = (e.discounts_pct, e.other_deductions_pct);
            if tables.post_invoice.insert(key, pcts).is_some() {
                return Err(duplicate(
                    "post_invoice_deductions",
                    post_invoice_key(&e.customer_code, &e.product_code, e.date),
                ));
            }
        }

        Ok(tables)
    }
}

impl PriceSource for LookupTables {
    fn unit_price(&self, product_code: &str, fiscal_year: i32) -> SalesResult<Money> {
        self.gross_prices
            .get(&(product_code.to_string(), fiscal_year))
            .copied()
            .ok_or_else(|| {
                SalesAnalyticsError::not_found(
                    "gross_price",
                    price_key(product_code, fiscal_year),
                )
            })
    }
}

impl DiscountSource for LookupTables {
    fn pre_invoice_discount_pct(
        &self,
        customer_code: &str,
        fiscal_year: i32,
    ) -> SalesResult<Percent> {
        self.pre_invoice
            .get(&(customer_code.to_string(), fiscal_year))
            .copied()
            .ok_or_else(|| {
                SalesAnalyticsError::not_found(
                    "pre_invoice_deductions",
                    pre_invoice_key(customer_code, fiscal_year),
                )
            })
    }

    fn post_invoice_discount_pct(
        &self,
        customer_code: &str,
        product_code: &str,
        date: NaiveDate,
    ) -> SalesResult<Percent> {
        let key = (customer_code.to_string(), product_code.to_string(), date);
        self.post_invoice
            .get(&key)
            .map(|(discounts, other)| discounts + other)
            .ok_or_else(|| {
                SalesAnalyticsError::not_found(
                    "post_invoice_deductions",
                    post_invoice_key(customer_code, product_code, date),
                )
            })
    }
}

// ---------------------------------------------------------------------------
// Key rendering
// ---------------------------------------------------------------------------

fn price_key(product_code: &str, fiscal_year: i32) -> String {
    format!("product_code={product_code}, fiscal_year={fiscal_year}")
}

fn pre_invoice_key(customer_code: &str, fiscal_year: i32) -> String {
    format!("customer_code={customer_code}, fiscal_year={fiscal_year}")
}

fn post_invoice_key(customer_code: &str, product_code: &str, date: NaiveDate) -> String {
    format!("customer_code={customer_code}, product_code={product_code}, date={date}")
}

fn duplicate(table: &str, key: String) -> SalesAnalyticsError {
    SalesAnalyticsError::invalid(table, format!("duplicate entry for {key}"))
}
