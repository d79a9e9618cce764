use clap::Args;
use serde_json::{json, Value};

use sales_analytics_core::fiscal;

/// Arguments for fiscal year lookup
#[derive(Args)]
pub struct FiscalYearArgs {
    /// Calendar date, YYYY-MM-DD
    #[arg(long)]
    pub date: String,
}

pub fn run_fiscal_year(args: FiscalYearArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let date = fiscal::parse_calendar_date(&args.date)?;
    Ok(json!({
        "result": {
            "date": date,
            "fiscal_year": fiscal::fiscal_year(date),
            "fiscal_quarter": fiscal::fiscal_quarter(date),
        }
    }))
}
