//! Side-by-side comparison of a blueberry plot with a tea estate of the
//! same size.
//!
//! The tea baseline is linear in acreage and uses fixed per-acre figures
//! typical of Darjeeling estates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{ratio, round_half_up};
use crate::calculations::investment::calculate;

/// Tea estate establishment cost per acre (₹).
pub const TEA_INVESTMENT_PER_ACRE: Decimal = Decimal::from_parts(300_000, 0, 0, false, 0);

/// Tea estate gross revenue per acre per year (₹).
pub const TEA_REVENUE_PER_ACRE: Decimal = Decimal::from_parts(150_000, 0, 0, false, 0);

/// Tea estate net profit per acre per year (₹).
pub const TEA_PROFIT_PER_ACRE: Decimal = Decimal::from_parts(45_000, 0, 0, false, 0);

/// Headline figures for one farming model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub investment: Decimal,
    pub annual_revenue: Decimal,
    pub annual_profit: Decimal,
    /// Annual profit as a percentage of investment.
    pub roi_percent: Decimal,
}

impl ModelSummary {
    fn new(
        investment: Decimal,
        annual_revenue: Decimal,
        annual_profit: Decimal,
    ) -> Self {
        Self {
            investment,
            annual_revenue,
            annual_profit,
            roi_percent: round_half_up(
                ratio(annual_profit, investment).saturating_mul(Decimal::ONE_HUNDRED),
            ),
        }
    }
}

/// Blueberry vs tea figures and their ratios (blueberry ÷ tea).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeaEstateComparison {
    pub acres: Decimal,
    pub blueberry: ModelSummary,
    pub tea: ModelSummary,
    pub investment_ratio: Decimal,
    pub revenue_ratio: Decimal,
    pub profit_ratio: Decimal,
    pub roi_ratio: Decimal,
}

/// Compares a mature blueberry plot with a tea estate of `acres`.
///
/// Ratios are zero when the tea side is zero (e.g. zero acres).
pub fn compare_with_tea_estate(
    acres: Decimal,
    price_per_kg: Option<Decimal>,
) -> TeaEstateComparison {
    let calc = calculate(acres, price_per_kg);

    let blueberry = ModelSummary::new(calc.total_cost, calc.expected_revenue, calc.net_profit);
    let tea = ModelSummary::new(
        acres.saturating_mul(TEA_INVESTMENT_PER_ACRE),
        acres.saturating_mul(TEA_REVENUE_PER_ACRE),
        acres.saturating_mul(TEA_PROFIT_PER_ACRE),
    );

    TeaEstateComparison {
        acres,
        investment_ratio: round_half_up(ratio(blueberry.investment, tea.investment)),
        revenue_ratio: round_half_up(ratio(blueberry.annual_revenue, tea.annual_revenue)),
        profit_ratio: round_half_up(ratio(blueberry.annual_profit, tea.annual_profit)),
        roi_ratio: round_half_up(ratio(blueberry.roi_percent, tea.roi_percent)),
        blueberry,
        tea,
    }
}
