pub mod fiscal;
pub mod metrics;
pub mod rankings;
pub mod reports;

use clap::Args;
use sales_analytics_core::dataset::SalesDataset;

use crate::input;

/// Where the dataset comes from
#[derive(Args)]
pub struct DatasetArgs {
    /// Path to JSON dataset (products, customers, price and deduction tables, sales)
    #[arg(long, env = "SALESQ_INPUT")]
    pub input: Option<String>,
}

impl DatasetArgs {
    pub fn load(&self) -> Result<SalesDataset, Box<dyn std::error::Error>> {
        let dataset: SalesDataset = if let Some(ref path) = self.input {
            input::file::read_json(path)?
        } else if let Some(data) = input::stdin::read_stdin()? {
            data
        } else {
            return Err("--input <dataset.json> or stdin required".into());
        };
        tracing::debug!(sales = dataset.sales.len(), "dataset loaded");
        Ok(dataset)
    }
}
