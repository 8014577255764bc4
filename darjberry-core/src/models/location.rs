use serde::{Deserialize, Serialize};

/// Suitability tier for blueberry cultivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Suitability {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl Suitability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Moderate => "MODERATE",
            Self::Poor => "POOR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "EXCELLENT" => Some(Self::Excellent),
            "GOOD" => Some(Self::Good),
            "MODERATE" => Some(Self::Moderate),
            "POOR" => Some(Self::Poor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Suitability {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Annual temperature range in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

/// Static feasibility attributes for a point, resolved from its district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAnalysis {
    /// Human-readable place description.
    pub location: String,
    pub district: String,
    pub soil_ph: f64,
    /// 0-100
    pub climate_score: u8,
    pub suitability: Suitability,
    /// Metres above sea level.
    pub elevation: f64,
    /// Annual rainfall in mm.
    pub rainfall: f64,
    pub temperature: TemperatureRange,
}
