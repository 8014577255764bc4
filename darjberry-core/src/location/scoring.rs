//! Weighted suitability score and cultivation tips.
//!
//! The score combines four components, each on a 0-100 scale:
//!
//! | Component   | Weight | 100 when          | 80 when           | otherwise |
//! |-------------|--------|-------------------|-------------------|-----------|
//! | Climate     | 40%    | (district score)  |                   |           |
//! | Soil pH     | 30%    | 4.0 ≤ pH ≤ 5.5    | 3.5 ≤ pH ≤ 6.0    | 50        |
//! | Elevation   | 20%    | > 500 m           | > 100 m           | 60        |
//! | Temperature | 10%    | max ≤ 30, min ≥ 5 |                   | 70        |

use crate::models::{LocationAnalysis, Suitability};

const CLIMATE_WEIGHT: u32 = 40;
const SOIL_WEIGHT: u32 = 30;
const ELEVATION_WEIGHT: u32 = 20;
const TEMPERATURE_WEIGHT: u32 = 10;

fn soil_component(ph: f64) -> u32 {
    if (4.0..=5.5).contains(&ph) {
        100
    } else if (3.5..=6.0).contains(&ph) {
        80
    } else {
        50
    }
}

fn elevation_component(elevation: f64) -> u32 {
    if elevation > 500.0 {
        100
    } else if elevation > 100.0 {
        80
    } else {
        60
    }
}

fn temperature_component(analysis: &LocationAnalysis) -> u32 {
    if analysis.temperature.max <= 30.0 && analysis.temperature.min >= 5.0 {
        100
    } else {
        70
    }
}

/// Overall suitability, 0-100, rounded half up.
pub fn suitability_score(analysis: &LocationAnalysis) -> u8 {
    let climate = u32::from(analysis.climate_score.min(100));
    let weighted = climate * CLIMATE_WEIGHT
        + soil_component(analysis.soil_ph) * SOIL_WEIGHT
        + elevation_component(analysis.elevation) * ELEVATION_WEIGHT
        + temperature_component(analysis) * TEMPERATURE_WEIGHT;

    // weights sum to 100, so the result never exceeds 100
    ((weighted + 50) / 100) as u8
}

fn tier_tip(suitability: Suitability) -> &'static str {
    match suitability {
        Suitability::Excellent => {
            "Excellent conditions: proceed with a standard polyhouse layout."
        }
        Suitability::Good => "Good conditions: start with a trial plot before scaling up.",
        Suitability::Moderate => {
            "Moderate conditions: budget for extra soil and climate management."
        }
        Suitability::Poor => "Poor conditions: blueberry cultivation is not advised here.",
    }
}

/// Practical tips for the location, most important first.
pub fn recommendations(analysis: &LocationAnalysis) -> Vec<String> {
    let mut tips = vec![tier_tip(analysis.suitability).to_string()];

    if analysis.soil_ph > 5.5 {
        tips.push(
            "Acidify the soil with elemental sulphur and pine-needle mulch to reach pH 4.5-5.5."
                .to_string(),
        );
    }
    if analysis.elevation < 200.0 {
        tips.push("Use raised beds to keep roots clear of standing water at low elevation.".to_string());
    }
    if analysis.rainfall > 3000.0 {
        tips.push(
            "Install drainage channels and watch for fungal disease during heavy monsoon rain."
                .to_string(),
        );
    }

    tips
}
