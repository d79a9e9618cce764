use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{to_millions, Money};
use crate::SalesResult;

use super::validate_n;

/// One group of a flat top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTotal {
    pub key: String,
    /// Summed value in millions, rounded to 2 places
    pub total_mln: Money,
}

/// Sum `value` per `key` preserving first-occurrence order.
pub fn sum_by_key<T, K, V>(items: &[T], key: K, value: V) -> Vec<(String, Money)>
where
    K: Fn(&T) -> &str,
    V: Fn(&T) -> Money,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, Money)> = Vec::new();

    for item in items {
        let k = key(item);
        match positions.get(k) {
            Some(&i) => totals[i].1 += value(item),
            None => {
                positions.insert(k, totals.len());
                totals.push((k.to_string(), value(item)));
            }
        }
    }

    totals
}

/// Group, sum, scale to millions and keep the first `n` groups by
/// descending scaled total. Ties on the scaled total order by key ascending.
pub fn top_n_by<T, K, V>(items: &[T], key: K, value: V, n: usize) -> SalesResult<Vec<RankedTotal>>
where
    K: Fn(&T) -> &str,
    V: Fn(&T) -> Money,
{
    validate_n(n)?;

    let mut ranked: Vec<RankedTotal> = sum_by_key(items, key, value)
        .into_iter()
        .map(|(key, total)| RankedTotal {
            key,
            total_mln: to_millions(total),
        })
        .collect();

    ranked.sort_by(|a, b| match b.total_mln.cmp(&a.total_mln) {
        Ordering::Equal => a.key.cmp(&b.key),
        other => other,
    });
    ranked.truncate(n);

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rows() -> Vec<(&'static str, Money)> {
        vec![
            ("India", dec!(1500000)),
            ("USA", dec!(900000)),
            ("India", dec!(500000)),
            ("Japan", dec!(900000)),
            ("Canada", dec!(250000)),
        ]
    }

    #[test]
    fn test_sum_by_key_first_occurrence_order() {
        let sums = sum_by_key(&rows(), |r| r.0, |r| r.1);
        let keys: Vec<&str> = sums.iter().map(|s| s.0.as_str()).collect();
        assert_eq!(keys, vec!["India", "USA", "Japan", "Canada"]);
        assert_eq!(sums[0].1, dec!(2000000));
    }

    #[test]
    fn test_top_n_descending_with_key_tiebreak() {
        let top = top_n_by(&rows(), |r| r.0, |r| r.1, 3).unwrap();
        assert_eq!(
            top,
            vec![
                RankedTotal { key: "India".into(), total_mln: dec!(2.00) },
                RankedTotal { key: "Japan".into(), total_mln: dec!(0.90) },
                RankedTotal { key: "USA".into(), total_mln: dec!(0.90) },
            ]
        );
    }

    #[test]
    fn test_top_n_prefix_property() {
        let all = top_n_by(&rows(), |r| r.0, |r| r.1, 10).unwrap();
        assert_eq!(all.len(), 4);
        for n in 1..=4 {
            let top = top_n_by(&rows(), |r| r.0, |r| r.1, n).unwrap();
            assert_eq!(top[..], all[..n]);
        }
    }

    #[test]
    fn test_top_n_zero_rejected() {
        assert!(top_n_by(&rows(), |r| r.0, |r| r.1, 0).is_err());
    }

    #[test]
    fn test_top_n_empty_input() {
        let empty: Vec<(&str, Money)> = vec![];
        assert!(top_n_by(&empty, |r| r.0, |r| r.1, 5).unwrap().is_empty());
    }
}
