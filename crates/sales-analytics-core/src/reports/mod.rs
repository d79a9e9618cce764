//! Reports beyond the top-N rankings: gross sales by month and fiscal year,
//! market badges, and net sales share by customer.

pub mod gross_sales;
pub mod market_badge;
pub mod net_sales_share;
