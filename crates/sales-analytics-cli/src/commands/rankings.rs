use clap::Args;
use serde_json::Value;

use sales_analytics_core::queries;

use super::DatasetArgs;

/// Arguments for top markets by net sales
#[derive(Args)]
pub struct TopMarketsArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Fiscal year (October–September, named after the ending year)
    #[arg(long)]
    pub fiscal_year: i32,

    /// Number of markets to return
    #[arg(long, default_value_t = 5)]
    pub n: usize,
}

/// Arguments for top customers in a market
#[derive(Args)]
pub struct TopCustomersArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Market, e.g. "India"
    #[arg(long)]
    pub market: String,

    #[arg(long)]
    pub fiscal_year: i32,

    #[arg(long, default_value_t = 5)]
    pub n: usize,
}

/// Arguments for top products per division
#[derive(Args)]
pub struct TopProductsArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[arg(long)]
    pub fiscal_year: i32,

    /// Highest dense rank kept per division
    #[arg(long, default_value_t = 3)]
    pub n: usize,
}

pub fn run_top_markets(args: TopMarketsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dataset = args.dataset.load()?;
    let indexed = dataset.index()?;
    let result = queries::top_n_by_market(&indexed, args.fiscal_year, args.n)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_top_customers(args: TopCustomersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dataset = args.dataset.load()?;
    let indexed = dataset.index()?;
    let result = queries::top_n_customers(&indexed, &args.market, args.fiscal_year, args.n)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_top_products(args: TopProductsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dataset = args.dataset.load()?;
    let indexed = dataset.index()?;
    let result = queries::top_n_products_per_division(&indexed, args.fiscal_year, args.n)?;
    Ok(serde_json::to_value(result)?)
}
