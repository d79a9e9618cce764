//! Grouping and ranking over derived sale records.
//!
//! - [`top_n`] — flat top-N of summed money totals, in millions.
//! - [`dense_rank`] — partitioned dense rank over summed quantities.

pub mod dense_rank;
pub mod top_n;

use crate::error::SalesAnalyticsError;
use crate::SalesResult;

/// Reject a non-positive N before any work is done.
pub fn validate_n(n: usize) -> SalesResult<()> {
    if n == 0 {
        return Err(SalesAnalyticsError::invalid("n", "must be at least 1"));
    }
    Ok(())
}
