use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages as stored in the deduction tables (5.00 = 5%).
pub type Percent = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Units sold on a sale line.
pub type Quantity = i64;

const ONE_MILLION: Decimal = dec!(1000000);
const ONE_HUNDRED: Decimal = dec!(100);

/// Round to `dp` places, half away from zero (SQL `ROUND`).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a stored percentage into a fraction (5.00 -> 0.05).
pub fn percent_to_rate(pct: Percent) -> Rate {
    pct / ONE_HUNDRED
}

/// Scale a money total into millions, rounded to 2 places for display.
pub fn to_millions(value: Money) -> Money {
    round_half_up(value / ONE_MILLION, 2)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_midpoint() {
        assert_eq!(round_half_up(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round_half_up(dec!(2.355), 2), dec!(2.36));
        assert_eq!(round_half_up(dec!(-2.345), 2), dec!(-2.35));
    }

    #[test]
    fn test_percent_to_rate() {
        assert_eq!(percent_to_rate(dec!(5.00)), dec!(0.05));
        assert_eq!(percent_to_rate(dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_to_millions() {
        assert_eq!(to_millions(dec!(12345678)), dec!(12.35));
        assert_eq!(to_millions(dec!(4999)), dec!(0.00));
    }
}
