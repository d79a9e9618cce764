mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::fiscal::FiscalYearArgs;
use commands::metrics::MetricsArgs;
use commands::rankings::{TopCustomersArgs, TopMarketsArgs, TopProductsArgs};
use commands::reports::{MarketBadgeArgs, MonthlyGrossArgs, NetSalesShareArgs, YearlyGrossArgs};

/// Sales profitability metrics and top-N rankings
#[derive(Parser)]
#[command(
    name = "salesq",
    version,
    about = "Sales profitability metrics and top-N rankings",
    long_about = "Derives gross, net-invoice and net sales for every sale line from \
                  price and deduction tables, then answers ranked questions: top \
                  markets, top customers, top products per division, market badges \
                  and net sales share. Reads a JSON dataset from --input or stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Fiscal year and quarter of a calendar date
    FiscalYear(FiscalYearArgs),
    /// Derive net sales metrics for every sale line
    Metrics(MetricsArgs),
    /// Top N markets by net sales
    TopMarkets(TopMarketsArgs),
    /// Top N customers in a market by net sales
    TopCustomers(TopCustomersArgs),
    /// Top N products per division by quantity sold (dense rank)
    TopProducts(TopProductsArgs),
    /// Gold/Silver badge for a market
    MarketBadge(MarketBadgeArgs),
    /// Monthly gross sales for a customer
    MonthlyGrossSales(MonthlyGrossArgs),
    /// Fiscal-year gross sales for a customer code
    YearlyGrossSales(YearlyGrossArgs),
    /// Net sales share by customer
    NetSalesShare(NetSalesShareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::FiscalYear(args) => commands::fiscal::run_fiscal_year(args),
        Commands::Metrics(args) => commands::metrics::run_metrics(args),
        Commands::TopMarkets(args) => commands::rankings::run_top_markets(args),
        Commands::TopCustomers(args) => commands::rankings::run_top_customers(args),
        Commands::TopProducts(args) => commands::rankings::run_top_products(args),
        Commands::MarketBadge(args) => commands::reports::run_market_badge(args),
        Commands::MonthlyGrossSales(args) => commands::reports::run_monthly_gross_sales(args),
        Commands::YearlyGrossSales(args) => commands::reports::run_yearly_gross_sales(args),
        Commands::NetSalesShare(args) => commands::reports::run_net_sales_share(args),
        Commands::Version => {
            println!("salesq {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
