use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SalesAnalyticsError;
use crate::types::Quantity;
use crate::SalesResult;

use super::validate_n;

/// One row of a partitioned dense-rank result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRank {
    pub partition: String,
    pub key: String,
    pub total: Quantity,
    /// 1-based dense rank within the partition
    pub rank: u32,
}

/// Dense ranks for totals already sorted descending. Equal totals share a
/// rank; the next distinct total takes the previous rank plus one.
pub fn dense_ranks(sorted_desc: &[Quantity]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(sorted_desc.len());
    let mut rank = 0u32;
    let mut previous: Option<Quantity> = None;

    for &total in sorted_desc {
        if previous != Some(total) {
            rank += 1;
            previous = Some(total);
        }
        ranks.push(rank);
    }

    ranks
}

/// Sum `value` per (partition, key), dense-rank each partition by
/// descending total and keep every row with rank <= n. Ties at the cutoff
/// rank are all kept, so a partition can yield more than n rows.
///
/// Rows come back ordered by partition, then rank, then key.
pub fn dense_rank_top_n<T, P, K, V>(
    items: &[T],
    partition: P,
    key: K,
    value: V,
    n: usize,
) -> SalesResult<Vec<PartitionRank>>
where
    P: Fn(&T) -> &str,
    K: Fn(&T) -> &str,
    V: Fn(&T) -> Quantity,
{
    validate_n(n)?;

    let mut partitions: BTreeMap<&str, BTreeMap<&str, Quantity>> = BTreeMap::new();
    for item in items {
        let total = partitions
            .entry(partition(item))
            .or_default()
            .entry(key(item))
            .or_insert(0);
        *total = total.checked_add(value(item)).ok_or_else(|| {
            SalesAnalyticsError::invalid(
                "total",
                format!("sum for key '{}' overflows a 64-bit count", key(item)),
            )
        })?;
    }

    let mut rows = Vec::new();
    for (part, totals) in partitions {
        let mut totals: Vec<(&str, Quantity)> = totals.into_iter().collect();
        // BTreeMap iteration is key-ascending; a stable sort keeps that on ties.
        totals.sort_by(|a, b| b.1.cmp(&a.1));

        let values: Vec<Quantity> = totals.iter().map(|t| t.1).collect();
        for ((k, total), rank) in totals.into_iter().zip(dense_ranks(&values)) {
            if rank as usize > n {
                break;
            }
            rows.push(PartitionRank {
                partition: part.to_string(),
                key: k.to_string(),
                total,
                rank,
            });
        }
    }

    Ok(rows)
}
