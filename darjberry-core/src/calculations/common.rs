//! Rounding and arithmetic helpers shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use darjberry_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(3.6075)), dec!(3.61));
/// assert_eq!(round_half_up(dec!(-1.005)), dec!(-1.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    round_to(value, 2)
}

/// Rounds to `dp` decimal places, half away from zero.
///
/// `round_to(x, 0)` matches the whole-number rounding used for plant counts
/// and the simplified IRR.
pub fn round_to(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Divides, clamping to [`Decimal::MAX`] or [`Decimal::MIN`] when the
/// quotient does not fit. The denominator must be non-zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use darjberry_core::calculations::common::saturating_div;
///
/// assert_eq!(saturating_div(dec!(10), dec!(4)), dec!(2.5));
/// assert_eq!(saturating_div(Decimal::MAX, dec!(0.5)), Decimal::MAX);
/// assert_eq!(saturating_div(Decimal::MAX, dec!(-0.5)), Decimal::MIN);
/// ```
pub fn saturating_div(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Divides `numerator` by `denominator`, returning zero when the
/// denominator is zero.
///
/// Degenerate inputs (zero acreage, zero profit) flow through the
/// calculators; this keeps them from panicking on division.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use darjberry_core::calculations::common::ratio;
///
/// assert_eq!(ratio(dec!(10), dec!(4)), dec!(2.5));
/// assert_eq!(ratio(dec!(10), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn ratio(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        saturating_div(numerator, denominator)
    }
}

/// Divides only when the denominator is strictly positive.
///
/// Payback-style figures ("years to recover X from annual profit P") have
/// no meaning for a loss-making year, so they collapse to zero.
pub fn years_to_recover(
    amount: Decimal,
    annual_profit: Decimal,
) -> Decimal {
    if annual_profit > Decimal::ZERO {
        saturating_div(amount, annual_profit)
    } else {
        Decimal::ZERO
    }
}
