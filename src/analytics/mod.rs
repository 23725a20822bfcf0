//! Derived metrics: pure computations from a transaction set to totals,
//! groupings, scores, budget status, goal progress and insights.

pub(crate) mod aggregate;
pub(crate) mod budget;
pub(crate) mod filter;
pub(crate) mod goals;
pub(crate) mod health;
pub(crate) mod insights;

pub(crate) use filter::Filter;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// `numerator / denominator` as a float, or 0 when the denominator is zero.
pub(crate) fn ratio(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator.is_zero() {
        return 0.0;
    }
    numerator
        .checked_div(denominator)
        .and_then(|r| r.to_f64())
        .unwrap_or(0.0)
}

/// Same as [`ratio`], scaled to a percentage. Scaling happens in decimal so
/// whole percentages come out exact.
pub(crate) fn percent(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator.is_zero() {
        return 0.0;
    }
    numerator
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(denominator))
        .and_then(|p| p.to_f64())
        .unwrap_or_else(|| ratio(numerator, denominator) * 100.0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{percent, ratio};

    #[test]
    fn test_ratio_zero_denominator_is_zero() {
        assert_eq!(ratio(dec!(500), Decimal::ZERO), 0.0);
        assert_eq!(percent(dec!(-500), Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_percent_exact() {
        assert_eq!(percent(dec!(12000), dec!(10000)), 120.0);
        assert_eq!(percent(dec!(1), dec!(4)), 25.0);
        assert_eq!(ratio(dec!(1), dec!(2)), 0.5);
    }
}
