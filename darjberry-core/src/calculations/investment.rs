//! Investment calculator for managed blueberry plots.
//!
//! Converts an area in acres and a farm-gate price per kilogram into a plant
//! count, a setup cost breakdown, a 20-year yield/revenue/cost projection,
//! a payback period and a simplified return figure.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Plants: `round(acres × 2200)` |
//! | 2    | Plant groups: `ceil(plants / 100)` (cost quantization) |
//! | 3    | Setup cost: 8 per-group components × plant groups |
//! | 4    | Operating cost: per-group constant × plant groups |
//! | 5    | Yield per year: plants × maturation curve (kg/plant) |
//! | 6    | Revenue: yield × price; commission: 10% of revenue |
//! | 7    | Net profit: revenue − operating cost − commission |
//! | 8    | Cumulative cash flow seeded at −setup cost |
//! | 9    | Payback: interpolated zero crossing of cumulative flow |
//! | 10   | IRR: average annual net profit ÷ setup cost × 100 |
//!
//! # Cost Quantization
//!
//! Costs are priced per 100-plant group and the group count rounds up, so
//! cost grows in steps at small scales: 0.004 acres (9 plants) still pays for
//! a full group. [`InvestmentCalculator::plant_groups`] exposes the step so it
//! can be checked directly.
//!
//! # Overflow
//!
//! Money arithmetic saturates at the `Decimal` range and counts saturate at
//! the `i64` range, so absurd inputs give clamped figures instead of a panic.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use darjberry_core::calculations::InvestmentCalculator;
//!
//! let calculator = InvestmentCalculator::default();
//! let result = calculator.calculate(dec!(1), Some(dec!(800)));
//!
//! assert_eq!(result.plants, 2200);
//! assert_eq!(result.projections.len(), 20);
//! assert_eq!(result.projections[3].yield_kg, dec!(6600));
//! assert_eq!(result.projections[3].revenue, dec!(5280000));
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{ratio, round_half_up, round_to, years_to_recover};
use crate::models::{CostBreakdown, InvestmentCalculation, YearProjection};

/// Planting density used to convert land area into plants.
pub const PLANTS_PER_ACRE: i64 = 2200;

/// Number of plants priced together as one cost unit.
pub const PLANT_GROUP_SIZE: i64 = 100;

/// Years covered by the projection.
pub const PROJECTION_YEARS: u32 = 20;

/// Farm-gate price used when the caller does not supply one (₹/kg).
pub const DEFAULT_PRICE_PER_KG: Decimal = Decimal::from_parts(800, 0, 0, false, 0);

/// Errors raised when validating a custom [`InvestmentConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculatorConfigError {
    #[error("plants per acre must be positive, got {0}")]
    InvalidPlantDensity(Decimal),

    #[error("plant group size must be positive, got {0}")]
    InvalidGroupSize(i64),

    #[error("commission rate must be between 0 and 1, got {0}")]
    InvalidCommissionRate(Decimal),

    #[error("yield curve must have at least one entry")]
    EmptyYieldCurve,

    #[error("yield curve entry for year {year} is negative: {value}")]
    NegativeYield { year: usize, value: Decimal },

    #[error("projection horizon must be at least one year")]
    EmptyHorizon,

    #[error("cost component '{0}' must not be negative")]
    NegativeCost(&'static str),

    #[error("default price per kg must be positive, got {0}")]
    InvalidDefaultPrice(Decimal),
}

/// Constants driving the investment model.
///
/// [`InvestmentConfig::default`] carries the published Darjberry figures.
/// Custom configurations are useful for what-if runs (a different
/// commission rate, a denser planting scheme) and must pass
/// [`InvestmentConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentConfig {
    /// Plants per acre (2 200).
    pub plants_per_acre: Decimal,

    /// Plants per cost unit (100).
    pub plant_group_size: i64,

    /// Setup cost of one plant group, per component (₹).
    pub cost_per_group: CostBreakdown,

    /// Yearly operating cost of one plant group (₹).
    pub operating_cost_per_group: Decimal,

    /// Kilograms per plant indexed by year (index 0 = planting year).
    /// Years past the end reuse the last entry.
    pub yield_curve: Vec<Decimal>,

    /// Fursat management commission as a fraction of gross revenue.
    pub commission_rate: Decimal,

    /// Number of projected years.
    pub projection_years: u32,

    /// Price used when none is given (₹/kg).
    pub default_price_per_kg: Decimal,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        Self {
            plants_per_acre: Decimal::from(PLANTS_PER_ACRE),
            plant_group_size: PLANT_GROUP_SIZE,
            cost_per_group: CostBreakdown {
                polyhouse: Decimal::from(150_000),
                plants: Decimal::from(40_000),
                soil_preparation: Decimal::from(15_000),
                irrigation: Decimal::from(20_000),
                labor: Decimal::from(25_000),
                transport: Decimal::from(5_000),
                consulting: Decimal::from(10_000),
                contingency: Decimal::from(10_000),
            },
            operating_cost_per_group: Decimal::from(30_000),
            yield_curve: vec![
                Decimal::ZERO,
                Decimal::new(5, 1),
                Decimal::ONE,
                Decimal::TWO,
                Decimal::from(3),
            ],
            commission_rate: Decimal::new(10, 2),
            projection_years: PROJECTION_YEARS,
            default_price_per_kg: DEFAULT_PRICE_PER_KG,
        }
    }
}

impl InvestmentConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorConfigError`] for the first value out of range.
    pub fn validate(&self) -> Result<(), CalculatorConfigError> {
        if self.plants_per_acre <= Decimal::ZERO {
            return Err(CalculatorConfigError::InvalidPlantDensity(
                self.plants_per_acre,
            ));
        }
        if self.plant_group_size <= 0 {
            return Err(CalculatorConfigError::InvalidGroupSize(
                self.plant_group_size,
            ));
        }
        if self.commission_rate < Decimal::ZERO || self.commission_rate > Decimal::ONE {
            return Err(CalculatorConfigError::InvalidCommissionRate(
                self.commission_rate,
            ));
        }
        if self.yield_curve.is_empty() {
            return Err(CalculatorConfigError::EmptyYieldCurve);
        }
        if let Some((year, value)) = self
            .yield_curve
            .iter()
            .enumerate()
            .find(|(_, v)| **v < Decimal::ZERO)
        {
            return Err(CalculatorConfigError::NegativeYield {
                year,
                value: *value,
            });
        }
        if self.projection_years == 0 {
            return Err(CalculatorConfigError::EmptyHorizon);
        }
        let costs = &self.cost_per_group;
        for (name, value) in [
            ("polyhouse", costs.polyhouse),
            ("plants", costs.plants),
            ("soil_preparation", costs.soil_preparation),
            ("irrigation", costs.irrigation),
            ("labor", costs.labor),
            ("transport", costs.transport),
            ("consulting", costs.consulting),
            ("contingency", costs.contingency),
            ("operating", self.operating_cost_per_group),
        ] {
            if value < Decimal::ZERO {
                return Err(CalculatorConfigError::NegativeCost(name));
            }
        }
        if self.default_price_per_kg <= Decimal::ZERO {
            return Err(CalculatorConfigError::InvalidDefaultPrice(
                self.default_price_per_kg,
            ));
        }
        Ok(())
    }
}

/// Investment projection calculator.
#[derive(Debug, Clone, Default)]
pub struct InvestmentCalculator {
    config: InvestmentConfig,
}

impl InvestmentCalculator {
    /// Creates a calculator from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorConfigError`] if the configuration is invalid.
    pub fn new(config: InvestmentConfig) -> Result<Self, CalculatorConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &InvestmentConfig {
        &self.config
    }

    /// Runs the full projection for `acres` at `price_per_kg`
    /// (defaults to the configured price).
    ///
    /// Never fails: zero acreage yields an all-zero result, negative
    /// acreage produces meaningless but finite numbers, and figures that
    /// overflow are clamped. Callers are responsible for range checks.
    pub fn calculate(
        &self,
        acres: Decimal,
        price_per_kg: Option<Decimal>,
    ) -> InvestmentCalculation {
        let price_per_kg = price_per_kg.unwrap_or(self.config.default_price_per_kg);
        if acres < Decimal::ZERO {
            warn!(%acres, "negative acreage passed to investment calculator");
        }

        let plants = self.plants_for(acres);
        let plant_groups = self.plant_groups(plants);
        let group_factor = Decimal::from(plant_groups);

        let breakdown_costs = self.config.cost_per_group.scaled(group_factor);
        let setup_cost = breakdown_costs.total();
        let annual_operating_cost = self
            .config
            .operating_cost_per_group
            .saturating_mul(group_factor);

        let projections = self.project(plants, price_per_kg, setup_cost, annual_operating_cost);

        let expected_yield = Decimal::from(plants).saturating_mul(self.mature_yield_per_plant());
        let expected_revenue = expected_yield.saturating_mul(price_per_kg);
        let net_profit = self.net_profit(expected_revenue, annual_operating_cost);
        let total_cost = setup_cost.saturating_add(annual_operating_cost);

        let result = InvestmentCalculation {
            acres,
            plants,
            plant_groups,
            price_per_kg,
            total_cost,
            setup_cost,
            annual_operating_cost,
            breakdown_costs,
            expected_yield,
            expected_revenue,
            net_profit,
            roi_years: round_to(years_to_recover(total_cost, net_profit), 1),
            payback_period: self.payback_period(setup_cost, &projections),
            five_year_profit: self.profit_after(5, setup_cost, &projections),
            ten_year_profit: self.profit_after(10, setup_cost, &projections),
            twenty_year_profit: self.profit_after(20, setup_cost, &projections),
            irr: self.simplified_irr(setup_cost, &projections),
            projections,
        };

        debug!(
            %acres,
            %price_per_kg,
            plants,
            setup_cost = %result.setup_cost,
            payback = %result.payback_period,
            "investment calculated"
        );

        result
    }

    /// Plant count for an area: `round(acres × plants_per_acre)`,
    /// saturating at the `i64` range.
    pub fn plants_for(
        &self,
        acres: Decimal,
    ) -> i64 {
        saturating_count(round_to(acres.saturating_mul(self.config.plants_per_acre), 0))
    }

    /// Number of cost groups needed for `plants`: `ceil(plants / group size)`.
    ///
    /// # Example
    ///
    /// ```
    /// use darjberry_core::calculations::InvestmentCalculator;
    ///
    /// let calculator = InvestmentCalculator::default();
    /// assert_eq!(calculator.plant_groups(2200), 22);
    /// assert_eq!(calculator.plant_groups(9), 1);
    /// assert_eq!(calculator.plant_groups(101), 2);
    /// ```
    pub fn plant_groups(
        &self,
        plants: i64,
    ) -> i64 {
        saturating_count(
            (Decimal::from(plants) / Decimal::from(self.config.plant_group_size)).ceil(),
        )
    }

    /// Kilograms per plant in a given year; clamps to the last curve entry.
    pub fn yield_per_plant(
        &self,
        year: u32,
    ) -> Decimal {
        let curve = &self.config.yield_curve;
        let index = (year as usize).min(curve.len().saturating_sub(1));
        curve.get(index).copied().unwrap_or(Decimal::ZERO)
    }

    fn mature_yield_per_plant(&self) -> Decimal {
        self.config
            .yield_curve
            .last()
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn commission(
        &self,
        revenue: Decimal,
    ) -> Decimal {
        round_half_up(revenue.saturating_mul(self.config.commission_rate))
    }

    fn net_profit(
        &self,
        revenue: Decimal,
        operating_cost: Decimal,
    ) -> Decimal {
        revenue
            .saturating_sub(operating_cost)
            .saturating_sub(self.commission(revenue))
    }

    /// Builds the year-by-year projection.
    fn project(
        &self,
        plants: i64,
        price_per_kg: Decimal,
        setup_cost: Decimal,
        operating_cost: Decimal,
    ) -> Vec<YearProjection> {
        let plants = Decimal::from(plants);
        let mut cumulative_cash_flow = -setup_cost;

        (1..=self.config.projection_years)
            .map(|year| {
                let yield_kg = plants.saturating_mul(self.yield_per_plant(year));
                let revenue = yield_kg.saturating_mul(price_per_kg);
                let fursat_commission = self.commission(revenue);
                let net_profit = self.net_profit(revenue, operating_cost);
                cumulative_cash_flow = cumulative_cash_flow.saturating_add(net_profit);

                YearProjection {
                    year,
                    yield_kg,
                    revenue,
                    operating_cost,
                    fursat_commission,
                    net_profit,
                    cumulative_cash_flow,
                }
            })
            .collect()
    }

    /// Cumulative cash flow at the end of `year`, net of setup cost.
    fn profit_after(
        &self,
        year: usize,
        setup_cost: Decimal,
        projections: &[YearProjection],
    ) -> Decimal {
        projections
            .iter()
            .take(year)
            .last()
            .map(|p| p.cumulative_cash_flow)
            .unwrap_or(-setup_cost)
    }

    /// Fractional year in which cumulative cash flow crosses zero.
    ///
    /// Interpolates linearly inside the crossing year. Returns zero when
    /// there is nothing to recover and `projections.len() + 1` when the
    /// setup cost is never recovered inside the horizon.
    fn payback_period(
        &self,
        setup_cost: Decimal,
        projections: &[YearProjection],
    ) -> Decimal {
        if setup_cost <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut cumulative = -setup_cost;
        for projection in projections {
            let previous = cumulative;
            cumulative = cumulative.saturating_add(projection.net_profit);
            if cumulative >= Decimal::ZERO && projection.net_profit > Decimal::ZERO {
                let fraction = -previous / projection.net_profit;
                return round_half_up(Decimal::from(projection.year - 1) + fraction);
            }
        }

        Decimal::from(projections.len() + 1)
    }

    /// Average annual net profit over setup cost, as a whole percentage.
    ///
    /// This is an average-return figure kept for compatibility with the
    /// published calculator; it does not discount cash flows.
    fn simplified_irr(
        &self,
        setup_cost: Decimal,
        projections: &[YearProjection],
    ) -> Decimal {
        if projections.is_empty() {
            return Decimal::ZERO;
        }
        let total = projections
            .iter()
            .map(|p| p.net_profit)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let average = total / Decimal::from(projections.len());
        round_to(
            ratio(average, setup_cost).saturating_mul(Decimal::ONE_HUNDRED),
            0,
        )
    }
}

/// Converts a whole-number count to `i64`, clamping at the type's range.
fn saturating_count(count: Decimal) -> i64 {
    count.to_i64().unwrap_or(if count.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Runs [`InvestmentCalculator::calculate`] with the default configuration.
pub fn calculate(
    acres: Decimal,
    price_per_kg: Option<Decimal>,
) -> InvestmentCalculation {
    InvestmentCalculator::default().calculate(acres, price_per_kg)
}
