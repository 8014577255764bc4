mod investment;
mod location;
mod records;

pub use investment::{CostBreakdown, InvestmentCalculation, YearProjection};
pub use location::{Coordinates, LocationAnalysis, Suitability, TemperatureRange};
pub use records::{InvestmentRecord, LocationCheck, NewInvestmentRecord, NewLocationCheck};
