use serde::{Deserialize, Serialize};

use crate::dimensions::{Customer, DimensionTables, Product};
use crate::lookups::{
    GrossPriceEntry, LookupTables, PostInvoiceDeductionEntry, PreInvoiceDeductionEntry,
};
use crate::pipeline::Sale;
use crate::SalesResult;

/// Raw tables as handed over by the loading layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesDataset {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub gross_prices: Vec<GrossPriceEntry>,
    #[serde(default)]
    pub pre_invoice_deductions: Vec<PreInvoiceDeductionEntry>,
    #[serde(default)]
    pub post_invoice_deductions: Vec<PostInvoiceDeductionEntry>,
    #[serde(default)]
    pub sales: Vec<Sale>,
}

impl SalesDataset {
    /// Build the keyed indexes every query runs against.
    pub fn index(&self) -> SalesResult<IndexedDataset<'_>> {
        let dimensions = DimensionTables::new(&self.products, &self.customers)?;
        let lookups = LookupTables::new(
            &self.gross_prices,
            &self.pre_invoice_deductions,
            &self.post_invoice_deductions,
        )?;
        tracing::debug!(
            products = self.products.len(),
            customers = self.customers.len(),
            sales = self.sales.len(),
            "dataset indexed"
        );
        Ok(IndexedDataset {
            dimensions,
            lookups,
            sales: &self.sales,
        })
    }
}

/// Read-only, point-in-time snapshot shared by all queries.
#[derive(Debug, Clone)]
pub struct IndexedDataset<'a> {
    pub dimensions: DimensionTables,
    pub lookups: LookupTables,
    pub sales: &'a [Sale],
}
