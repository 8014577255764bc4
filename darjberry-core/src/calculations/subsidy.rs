//! Government subsidy estimate for a calculated investment.
//!
//! Two schemes are applied to the setup cost breakdown:
//!
//! | Component  | Subsidy | Cap |
//! |------------|---------|-----|
//! | Polyhouse  | 50%     | ₹15,00,000 |
//! | Irrigation | 45%     | none |
//!
//! The subsidies reduce the investor's outlay; the improved ROI is the
//! number of mature years needed to earn the reduced outlay back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{round_half_up, round_to, years_to_recover};
use crate::models::InvestmentCalculation;

/// Share of polyhouse cost covered by the subsidy.
pub const POLYHOUSE_SUBSIDY_RATE: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

/// Upper limit of the polyhouse subsidy (₹).
pub const POLYHOUSE_SUBSIDY_CAP: Decimal = Decimal::from_parts(1_500_000, 0, 0, false, 0);

/// Share of drip-irrigation cost covered by the subsidy.
pub const IRRIGATION_SUBSIDY_RATE: Decimal = Decimal::from_parts(45, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidyBenefit {
    pub polyhouse_subsidy: Decimal,
    pub irrigation_subsidy: Decimal,
    pub total_subsidy: Decimal,
    /// `total_cost` minus both subsidies.
    pub net_investment: Decimal,
    /// Years of mature net profit needed to recover the net investment.
    pub improved_roi: Decimal,
}

/// Applies the polyhouse and irrigation subsidies to `calc`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use darjberry_core::calculations::{calculate, calculate_subsidy_benefit};
///
/// let calc = calculate(dec!(1), Some(dec!(800)));
/// let benefit = calculate_subsidy_benefit(&calc);
///
/// // 50% of ₹33,00,000 is capped at ₹15,00,000
/// assert_eq!(benefit.polyhouse_subsidy, dec!(1500000));
/// ```
pub fn calculate_subsidy_benefit(calc: &InvestmentCalculation) -> SubsidyBenefit {
    let polyhouse_subsidy = round_half_up(
        (calc.breakdown_costs.polyhouse.saturating_mul(POLYHOUSE_SUBSIDY_RATE))
            .min(POLYHOUSE_SUBSIDY_CAP),
    );
    let irrigation_subsidy =
        round_half_up(calc.breakdown_costs.irrigation.saturating_mul(IRRIGATION_SUBSIDY_RATE));
    let total_subsidy = polyhouse_subsidy.saturating_add(irrigation_subsidy);
    let net_investment = calc.total_cost.saturating_sub(total_subsidy);

    debug!(%total_subsidy, %net_investment, "subsidy applied");

    SubsidyBenefit {
        polyhouse_subsidy,
        irrigation_subsidy,
        total_subsidy,
        net_investment,
        improved_roi: round_to(years_to_recover(net_investment, calc.net_profit), 1),
    }
}
