use tracing::{debug, warn};

use super::regions::{
    DISTRICTS, DistrictProfile, FALLBACK_DISTRICT, NORTH_BENGAL, OUTSIDE_REGION, district,
};
use super::scoring;
use crate::models::{Coordinates, LocationAnalysis};

/// Resolves coordinates to a district profile.
///
/// Districts are checked in table order and the first containing box wins.
/// Points inside North Bengal that miss every box resolve to the fallback
/// district; anything else gets the outside-region profile.
#[derive(Debug, Clone, Copy)]
pub struct LocationAnalyzer {
    districts: &'static [DistrictProfile],
}

impl Default for LocationAnalyzer {
    fn default() -> Self {
        Self {
            districts: &DISTRICTS,
        }
    }
}

impl LocationAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzes a single point.
    pub fn analyze(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> LocationAnalysis {
        debug!(latitude, longitude, "Analyzing location");

        let profile = self.resolve(latitude, longitude);
        if profile.key == OUTSIDE_REGION.key {
            warn!(latitude, longitude, "Location is outside North Bengal");
        }

        to_analysis(profile)
    }

    pub fn analyze_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> LocationAnalysis {
        self.analyze(coordinates.latitude, coordinates.longitude)
    }

    /// Analyzes each point in order.
    pub fn analyze_batch(
        &self,
        coordinates: &[Coordinates],
    ) -> Vec<LocationAnalysis> {
        coordinates
            .iter()
            .map(|c| self.analyze_coordinates(*c))
            .collect()
    }

    pub fn suitability_score(
        &self,
        analysis: &LocationAnalysis,
    ) -> u8 {
        scoring::suitability_score(analysis)
    }

    pub fn recommendations(
        &self,
        analysis: &LocationAnalysis,
    ) -> Vec<String> {
        scoring::recommendations(analysis)
    }

    fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> &'static DistrictProfile {
        if let Some(profile) = self
            .districts
            .iter()
            .find(|d| d.bounds.contains(latitude, longitude))
        {
            return profile;
        }

        NORTH_BENGAL
            .contains(latitude, longitude)
            .then(|| district(FALLBACK_DISTRICT))
            .flatten()
            .unwrap_or(&OUTSIDE_REGION)
    }
}

fn to_analysis(profile: &DistrictProfile) -> LocationAnalysis {
    LocationAnalysis {
        location: profile.location.to_string(),
        district: profile.district.to_string(),
        soil_ph: profile.soil_ph,
        climate_score: profile.climate_score,
        suitability: profile.suitability,
        elevation: profile.elevation,
        rainfall: profile.rainfall,
        temperature: profile.temperature,
    }
}

/// Analyzes a point with the default district table.
pub fn analyze(
    latitude: f64,
    longitude: f64,
) -> LocationAnalysis {
    LocationAnalyzer::default().analyze(latitude, longitude)
}
