pub mod dataset;
pub mod dimensions;
pub mod error;
pub mod fiscal;
pub mod lookups;
pub mod pipeline;
pub mod queries;
pub mod ranking;
pub mod types;

#[cfg(feature = "reports")]
pub mod reports;

pub use error::SalesAnalyticsError;
pub use types::*;

/// Standard result type for all sales-analytics operations
pub type SalesResult<T> = Result<T, SalesAnalyticsError>;
