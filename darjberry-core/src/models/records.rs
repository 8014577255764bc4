use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Coordinates, InvestmentCalculation, LocationAnalysis, Suitability};
use crate::location::scoring::suitability_score;

/// A saved investment calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentRecord {
    pub id: i64,
    pub investor_name: Option<String>,
    pub notes: Option<String>,

    // Inputs
    pub acres: Decimal,
    pub price_per_kg: Decimal,

    // Calculated values
    pub plants: i64,
    pub setup_cost: Decimal,
    pub total_cost: Decimal,
    pub net_profit: Decimal,
    pub payback_period: Decimal,
    pub irr: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For saving new calculations (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvestmentRecord {
    pub investor_name: Option<String>,
    pub notes: Option<String>,
    pub acres: Decimal,
    pub price_per_kg: Decimal,
    pub plants: i64,
    pub setup_cost: Decimal,
    pub total_cost: Decimal,
    pub net_profit: Decimal,
    pub payback_period: Decimal,
    pub irr: Decimal,
}

impl NewInvestmentRecord {
    /// Snapshots the headline figures of `calc`.
    pub fn from_calculation(
        calc: &InvestmentCalculation,
        investor_name: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            investor_name,
            notes,
            acres: calc.acres,
            price_per_kg: calc.price_per_kg,
            plants: calc.plants,
            setup_cost: calc.setup_cost,
            total_cost: calc.total_cost,
            net_profit: calc.net_profit,
            payback_period: calc.payback_period,
            irr: calc.irr,
        }
    }
}

/// A saved location feasibility check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCheck {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub district: String,
    pub suitability: Suitability,
    pub climate_score: u8,
    pub suitability_score: u8,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocationCheck {
    pub latitude: f64,
    pub longitude: f64,
    pub district: String,
    pub suitability: Suitability,
    pub climate_score: u8,
    pub suitability_score: u8,
}

impl NewLocationCheck {
    pub fn from_analysis(
        coordinates: Coordinates,
        analysis: &LocationAnalysis,
    ) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            district: analysis.district.clone(),
            suitability: analysis.suitability,
            climate_score: analysis.climate_score,
            suitability_score: suitability_score(analysis),
        }
    }
}
