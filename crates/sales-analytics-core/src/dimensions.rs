//! Product and customer dimensions.
//!
//! Rows are indexed by identifier once per dataset and looked up through
//! [`DimensionSource`]; an unknown identifier is `NotFound`, never a blank row.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SalesAnalyticsError;
use crate::SalesResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Product dimension row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product code, e.g. "A0118150101"
    pub product_code: String,
    pub product: String,
    pub variant: String,
    /// Grouping key for partitioned rankings, e.g. "P & A", "PC", "N & S"
    pub division: String,
}

/// Customer dimension row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer code, e.g. "90002002"
    pub customer_code: String,
    pub customer: String,
    pub market: String,
    pub region: String,
}

/// Product-by-id and customer-by-id lookups supplied by the loading layer.
pub trait DimensionSource {
    fn product(&self, product_code: &str) -> SalesResult<&Product>;
    fn customer(&self, customer_code: &str) -> SalesResult<&Customer>;
}

/// In-memory dimension tables indexed by identifier.
#[derive(Debug, Clone, Default)]
pub struct DimensionTables {
    products: HashMap<String, Product>,
    customers: HashMap<String, Customer>,
}

impl DimensionTables {
    /// Index dimension rows. Identifiers must be unique per table.
    pub fn new(products: &[Product], customers: &[Customer]) -> SalesResult<Self> {
        let mut tables = DimensionTables::default();

        for p in products {
            if tables
                .products
                .insert(p.product_code.clone(), p.clone())
                .is_some()
            {
                return Err(SalesAnalyticsError::invalid(
                    "products",
                    format!("duplicate product_code {}", p.product_code),
                ));
            }
        }

        for c in customers {
            if tables
                .customers
                .insert(c.customer_code.clone(), c.clone())
                .is_some()
            {
                return Err(SalesAnalyticsError::invalid(
                    "customers",
                    format!("duplicate customer_code {}", c.customer_code),
                ));
            }
        }

        Ok(tables)
    }

    /// Customer codes whose customer name matches exactly.
    pub fn customer_codes_named(&self, name: &str) -> Vec<String> {
        let mut codes: Vec<String> = self
            .customers
            .values()
            .filter(|c| c.customer == name)
            .map(|c| c.customer_code.clone())
            .collect();
        codes.sort();
        codes
    }
}

impl DimensionSource for DimensionTables {
    fn product(&self, product_code: &str) -> SalesResult<&Product> {
        self.products
            .get(product_code)
            .ok_or_else(|| SalesAnalyticsError::not_found("dim_product", product_code))
    }

    fn customer(&self, customer_code: &str) -> SalesResult<&Customer> {
        self.customers
            .get(customer_code)
            .ok_or_else(|| SalesAnalyticsError::not_found("dim_customer", customer_code))
    }
}
