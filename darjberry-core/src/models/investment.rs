use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Setup cost split into its eight components.
///
/// Used both for the per-100-plant price list in the calculator config and
/// for the scaled breakdown of a concrete calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub polyhouse: Decimal,
    pub plants: Decimal,
    pub soil_preparation: Decimal,
    pub irrigation: Decimal,
    pub labor: Decimal,
    pub transport: Decimal,
    pub consulting: Decimal,
    pub contingency: Decimal,
}

impl CostBreakdown {
    /// Sum of every component, clamped at the `Decimal` range.
    pub fn total(&self) -> Decimal {
        [
            self.polyhouse,
            self.plants,
            self.soil_preparation,
            self.irrigation,
            self.labor,
            self.transport,
            self.consulting,
            self.contingency,
        ]
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Multiplies every component by `factor`, clamping on overflow.
    pub fn scaled(
        &self,
        factor: Decimal,
    ) -> Self {
        Self {
            polyhouse: self.polyhouse.saturating_mul(factor),
            plants: self.plants.saturating_mul(factor),
            soil_preparation: self.soil_preparation.saturating_mul(factor),
            irrigation: self.irrigation.saturating_mul(factor),
            labor: self.labor.saturating_mul(factor),
            transport: self.transport.saturating_mul(factor),
            consulting: self.consulting.saturating_mul(factor),
            contingency: self.contingency.saturating_mul(factor),
        }
    }
}

/// One year of the 20-year projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearProjection {
    /// 1-based year number.
    pub year: u32,
    /// Harvest in kilograms.
    pub yield_kg: Decimal,
    pub revenue: Decimal,
    pub operating_cost: Decimal,
    /// Management fee taken from gross revenue.
    pub fursat_commission: Decimal,
    /// `revenue - operating_cost - fursat_commission`
    pub net_profit: Decimal,
    /// Running total seeded at `-setup_cost`.
    pub cumulative_cash_flow: Decimal,
}

/// Full output of the investment calculator for one acreage and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentCalculation {
    pub acres: Decimal,
    pub plants: i64,
    /// Number of 100-plant cost units, rounded up.
    pub plant_groups: i64,
    pub price_per_kg: Decimal,

    // Costs
    pub total_cost: Decimal,
    pub setup_cost: Decimal,
    pub annual_operating_cost: Decimal,
    pub breakdown_costs: CostBreakdown,

    // Steady-state (mature orchard) figures
    pub expected_yield: Decimal,
    pub expected_revenue: Decimal,
    pub net_profit: Decimal,
    pub roi_years: Decimal,

    // Projection-derived figures
    pub payback_period: Decimal,
    pub five_year_profit: Decimal,
    pub ten_year_profit: Decimal,
    pub twenty_year_profit: Decimal,
    /// Average annual net profit over setup cost, as a whole percentage.
    /// This is an average-return figure, not a discounted IRR.
    pub irr: Decimal,

    pub projections: Vec<YearProjection>,
}

impl InvestmentCalculation {
    /// Setup cost per plant, or `None` when there are no plants.
    pub fn cost_per_plant(&self) -> Option<Decimal> {
        if self.plants == 0 {
            None
        } else {
            Some(self.setup_cost / Decimal::from(self.plants))
        }
    }

    /// Projection row for a 1-based year, if it is inside the horizon.
    pub fn projection_for_year(
        &self,
        year: u32,
    ) -> Option<&YearProjection> {
        self.projections.iter().find(|p| p.year == year)
    }
}
