//! Variance, percentage, and column-total calculations.
//!
//! All functions are total: they never fail and never panic. Division by a
//! zero budget or zero revenue is replaced by explicit zero/sentinel results.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::types::PeriodAmount;

/// Variance reported when the budget is zero but the actual is not.
///
/// A display convention for "infinite" variance, not a real percentage.
pub const VARIANCE_SENTINEL: i64 = 999;

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Stateless report calculations.
pub struct ReportCalculator;

impl ReportCalculator {
    /// Sums each of the four period fields across rows.
    ///
    /// An empty slice yields [`PeriodAmount::ZERO`].
    #[must_use]
    pub fn sum_amounts(rows: &[PeriodAmount]) -> PeriodAmount {
        rows.iter().sum()
    }

    /// Variance for a revenue line: over budget is favorable.
    ///
    /// `round((actual - budget) / budget * 100)`, with `0` when both are zero
    /// and `±999` when only the budget is zero.
    #[must_use]
    pub fn variance_for_revenue(actual: Decimal, budget: Decimal) -> i64 {
        if budget.is_zero() {
            return Self::zero_budget_variance(actual, false);
        }
        match actual.checked_sub(budget) {
            Some(diff) => Self::ratio_percent(diff, budget),
            // Only overflows when actual and budget have opposite signs.
            None => Self::saturate(actual.is_sign_positive() == budget.is_sign_positive()),
        }
    }

    /// Variance for a cost line: under budget is favorable.
    ///
    /// `round((budget - actual) / budget * 100)`, with `0` when both are zero
    /// and `∓999` when only the budget is zero.
    #[must_use]
    pub fn variance_for_cost(actual: Decimal, budget: Decimal) -> i64 {
        if budget.is_zero() {
            return Self::zero_budget_variance(actual, true);
        }
        match budget.checked_sub(actual) {
            Some(diff) => Self::ratio_percent(diff, budget),
            // Overflow means opposite signs, so the ratio is positive.
            None => Self::saturate(true),
        }
    }

    /// `round(numerator / revenue * 100)`, or `0` when revenue is zero.
    #[must_use]
    pub fn percentage_of_revenue(numerator: Decimal, revenue: Decimal) -> i64 {
        if revenue.is_zero() {
            return 0;
        }
        Self::ratio_percent(numerator, revenue)
    }

    /// Rounds to the nearest integer with halves toward positive infinity.
    #[must_use]
    pub fn round_half_up(value: Decimal) -> i64 {
        let rounded = value.checked_add(HALF).unwrap_or(value).floor();
        rounded
            .to_i64()
            .unwrap_or_else(|| Self::saturate(rounded.is_sign_positive()))
    }

    fn zero_budget_variance(actual: Decimal, inverted: bool) -> i64 {
        if actual.is_zero() {
            return 0;
        }
        let favorable = actual.is_sign_positive() != inverted;
        if favorable {
            VARIANCE_SENTINEL
        } else {
            -VARIANCE_SENTINEL
        }
    }

    fn ratio_percent(numerator: Decimal, denominator: Decimal) -> i64 {
        numerator
            .checked_div(denominator)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or_else(
                || {
                    Self::saturate(
                        numerator.is_sign_positive() == denominator.is_sign_positive(),
                    )
                },
                Self::round_half_up,
            )
    }

    const fn saturate(positive: bool) -> i64 {
        if positive { i64::MAX } else { i64::MIN }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1200), dec!(1000), 20)]
    #[case(dec!(800), dec!(1000), -20)]
    #[case(dec!(1000), dec!(1000), 0)]
    #[case(dec!(0), dec!(0), 0)]
    #[case(dec!(100), dec!(0), 999)]
    #[case(dec!(-100), dec!(0), -999)]
    #[case(dec!(0), dec!(500), -100)]
    #[case(dec!(1), dec!(3), -67)]
    fn test_variance_for_revenue(
        #[case] actual: Decimal,
        #[case] budget: Decimal,
        #[case] expected: i64,
    ) {
        assert_eq!(ReportCalculator::variance_for_revenue(actual, budget), expected);
    }

    #[rstest]
    #[case(dec!(800), dec!(1000), 20)]
    #[case(dec!(1200), dec!(1000), -20)]
    #[case(dec!(1000), dec!(1000), 0)]
    #[case(dec!(0), dec!(0), 0)]
    #[case(dec!(100), dec!(0), -999)]
    #[case(dec!(-100), dec!(0), 999)]
    #[case(dec!(0), dec!(500), 100)]
    fn test_variance_for_cost(
        #[case] actual: Decimal,
        #[case] budget: Decimal,
        #[case] expected: i64,
    ) {
        assert_eq!(ReportCalculator::variance_for_cost(actual, budget), expected);
    }

    #[rstest]
    #[case(dec!(50), dec!(200), 25)]
    #[case(dec!(-50), dec!(200), -25)]
    #[case(dec!(1), dec!(3), 33)]
    #[case(dec!(2), dec!(3), 67)]
    #[case(dec!(50), dec!(0), 0)]
    #[case(dec!(0), dec!(0), 0)]
    fn test_percentage_of_revenue(
        #[case] numerator: Decimal,
        #[case] revenue: Decimal,
        #[case] expected: i64,
    ) {
        assert_eq!(ReportCalculator::percentage_of_revenue(numerator, revenue), expected);
    }

    #[rstest]
    #[case(dec!(2.5), 3)]
    #[case(dec!(-2.5), -2)]
    #[case(dec!(2.4999), 2)]
    #[case(dec!(-2.5001), -3)]
    #[case(dec!(0), 0)]
    fn test_round_half_up(#[case] value: Decimal, #[case] expected: i64) {
        assert_eq!(ReportCalculator::round_half_up(value), expected);
    }

    #[test]
    fn test_sum_amounts() {
        let rows = [
            PeriodAmount::new(dec!(1), dec!(10), dec!(100), dec!(1000)),
            PeriodAmount::new(dec!(2), dec!(20), dec!(200), dec!(2000)),
        ];

        let total = ReportCalculator::sum_amounts(&rows);
        assert_eq!(total.actual, dec!(3));
        assert_eq!(total.cumulative, dec!(30));
        assert_eq!(total.previous, dec!(300));
        assert_eq!(total.budget, dec!(3000));
    }

    #[test]
    fn test_sum_amounts_empty() {
        assert_eq!(ReportCalculator::sum_amounts(&[]), PeriodAmount::ZERO);
    }

    #[test]
    fn test_tiny_budget_saturates_instead_of_panicking() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(ReportCalculator::variance_for_revenue(Decimal::MAX, tiny), i64::MAX);
        assert_eq!(ReportCalculator::variance_for_cost(Decimal::MAX, tiny), i64::MIN);
    }

    #[test]
    fn test_opposite_sign_overflow_saturates() {
        assert_eq!(
            ReportCalculator::variance_for_revenue(Decimal::MAX, Decimal::MIN),
            i64::MIN
        );
        assert_eq!(
            ReportCalculator::variance_for_cost(Decimal::MAX, Decimal::MIN),
            i64::MAX
        );
    }
}
