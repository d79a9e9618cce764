use clap::Args;
use serde_json::Value;

use sales_analytics_core::reports::gross_sales;
use sales_analytics_core::reports::market_badge;
use sales_analytics_core::reports::net_sales_share;

use super::DatasetArgs;

/// Arguments for market badge
#[derive(Args)]
pub struct MarketBadgeArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[arg(long)]
    pub market: String,

    #[arg(long)]
    pub fiscal_year: i32,
}

/// Arguments for the monthly gross sales report
#[derive(Args)]
pub struct MonthlyGrossArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Customer name; every customer code carrying this name is included
    #[arg(long)]
    pub customer: String,
}

/// Arguments for the yearly gross sales report
#[derive(Args)]
pub struct YearlyGrossArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Customer code
    #[arg(long)]
    pub customer_code: String,
}

/// Arguments for net sales share
#[derive(Args)]
pub struct NetSalesShareArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[arg(long)]
    pub fiscal_year: i32,

    /// Restrict to one region, e.g. "APAC"
    #[arg(long, conflicts_with = "by_region")]
    pub region: Option<String>,

    /// Compute shares within each region instead of across the whole year
    #[arg(long)]
    pub by_region: bool,

    /// Customers kept per region with --by-region
    #[arg(long, default_value_t = 10)]
    pub n: usize,
}

pub fn run_market_badge(args: MarketBadgeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dataset = args.dataset.load()?;
    let indexed = dataset.index()?;
    let result = market_badge::market_badge(&indexed, &args.market, args.fiscal_year)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_monthly_gross_sales(
    args: MonthlyGrossArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let dataset = args.dataset.load()?;
    let indexed = dataset.index()?;
    let codes = indexed.dimensions.customer_codes_named(&args.customer);
    if codes.is_empty() {
        return Err(format!("No customer named '{}'", args.customer).into());
    }
    let result = gross_sales::monthly_gross_sales(&indexed, &codes)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_yearly_gross_sales(args: YearlyGrossArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dataset = args.dataset.load()?;
    let indexed = dataset.index()?;
    let result = gross_sales::yearly_gross_sales(&indexed, &args.customer_code)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_net_sales_share(args: NetSalesShareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dataset = args.dataset.load()?;
    let indexed = dataset.index()?;
    if args.by_region {
        let result =
            net_sales_share::net_sales_share_by_region(&indexed, args.fiscal_year, args.n)?;
        return Ok(serde_json::to_value(result)?);
    }
    let result =
        net_sales_share::net_sales_share(&indexed, args.fiscal_year, args.region.as_deref())?;
    Ok(serde_json::to_value(result)?)
}
