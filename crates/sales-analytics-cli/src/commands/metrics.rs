use clap::Args;
use serde_json::Value;

use sales_analytics_core::queries;

use super::DatasetArgs;

/// Arguments for metric derivation
#[derive(Args)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
}

pub fn run_metrics(args: MetricsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dataset = args.dataset.load()?;
    let indexed = dataset.index()?;
    let result = queries::compute_metrics(&indexed);
    Ok(serde_json::to_value(result)?)
}
