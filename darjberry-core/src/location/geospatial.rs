//! Coarse satellite-style suitability reports.
//!
//! A separate, broader classifier than [`super::analyzer`]: four nested
//! regions with a fixed score each, from which soil, climate and topography
//! estimates are derived. Reports are cached per coordinate for 30 days.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::regions::BoundingBox;
use crate::models::{Coordinates, Suitability};

/// How long a generated report stays valid.
pub const REPORT_TTL_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRegion {
    pub name: &'static str,
    pub bounds: BoundingBox,
    pub suitability: Suitability,
    pub score: u8,
}

/// Checked in order; first match wins.
pub const GEO_REGIONS: [GeoRegion; 3] = [
    GeoRegion {
        name: "Darjeeling Hills",
        bounds: BoundingBox::new(26.8, 27.3, 87.9, 88.6),
        suitability: Suitability::Excellent,
        score: 92,
    },
    GeoRegion {
        name: "North Bengal",
        bounds: BoundingBox::new(25.0, 27.5, 87.5, 90.0),
        suitability: Suitability::Good,
        score: 75,
    },
    GeoRegion {
        name: "Indian subcontinent",
        bounds: BoundingBox::new(8.0, 37.0, 68.0, 97.5),
        suitability: Suitability::Moderate,
        score: 55,
    },
];

pub const UNMAPPED_REGION: &str = "Unmapped";
pub const UNMAPPED_SCORE: u8 = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    pub ph: f64,
    pub organic_matter_pct: f64,
    pub drainage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateProfile {
    pub avg_temp_c: f64,
    pub annual_rainfall_mm: f64,
    pub humidity_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topography {
    pub elevation_m: f64,
    pub slope_deg: f64,
    pub aspect: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteSuitability {
    pub coordinates: Coordinates,
    pub region: String,
    pub suitability: Suitability,
    pub score: u8,
    pub soil: SoilProfile,
    pub climate: ClimateProfile,
    pub topography: Topography,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SatelliteSuitability {
    pub fn is_expired(
        &self,
        now: DateTime<Utc>,
    ) -> bool {
        now >= self.expires_at
    }
}

fn soil_for(score: u8) -> SoilProfile {
    let (ph, organic_matter_pct, drainage) = match score {
        85.. => (5.0, 4.5, "well-drained"),
        70.. => (5.5, 3.5, "moderately well-drained"),
        50.. => (6.5, 2.0, "moderate"),
        _ => (7.5, 1.0, "poor"),
    };
    SoilProfile {
        ph,
        organic_matter_pct,
        drainage: drainage.to_string(),
    }
}

fn climate_for(score: u8) -> ClimateProfile {
    let (avg_temp_c, annual_rainfall_mm, humidity_pct) = match score {
        85.. => (18.0, 2800.0, 80.0),
        70.. => (22.0, 2500.0, 75.0),
        50.. => (26.0, 1200.0, 65.0),
        _ => (30.0, 600.0, 50.0),
    };
    ClimateProfile {
        avg_temp_c,
        annual_rainfall_mm,
        humidity_pct,
    }
}

fn topography_for(score: u8) -> Topography {
    let (elevation_m, slope_deg, aspect) = match score {
        85.. => (1800.0, 15.0, "south-east"),
        70.. => (800.0, 10.0, "south"),
        50.. => (300.0, 5.0, "flat"),
        _ => (50.0, 2.0, "flat"),
    };
    Topography {
        elevation_m,
        slope_deg,
        aspect: aspect.to_string(),
    }
}

/// Builds a fresh report for `coordinates`, stamped at `now`.
pub fn generate(
    coordinates: Coordinates,
    now: DateTime<Utc>,
) -> SatelliteSuitability {
    let (region, suitability, score) = GEO_REGIONS
        .iter()
        .find(|r| r.bounds.contains(coordinates.latitude, coordinates.longitude))
        .map(|r| (r.name, r.suitability, r.score))
        .unwrap_or((UNMAPPED_REGION, Suitability::Poor, UNMAPPED_SCORE));

    SatelliteSuitability {
        coordinates,
        region: region.to_string(),
        suitability,
        score,
        soil: soil_for(score),
        climate: climate_for(score),
        topography: topography_for(score),
        generated_at: now,
        expires_at: now + Duration::days(REPORT_TTL_DAYS),
    }
}

/// Cache key: both coordinates to four decimal places.
pub fn cache_key(coordinates: Coordinates) -> String {
    format!("{:.4},{:.4}", coordinates.latitude, coordinates.longitude)
}

/// Reports keyed by [`cache_key`]. Expired entries are dropped on read.
#[derive(Debug, Clone, Default)]
pub struct SuitabilityCache {
    entries: HashMap<String, SatelliteSuitability>,
}

impl SuitabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        key: &str,
        now: DateTime<Utc>,
    ) -> Option<&SatelliteSuitability> {
        if self.entries.get(key).is_some_and(|r| r.is_expired(now)) {
            self.entries.remove(key);
        }
        self.entries.get(key)
    }

    pub fn insert(
        &mut self,
        key: String,
        report: SatelliteSuitability,
    ) {
        self.entries.insert(key, report);
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn purge_expired(
        &mut self,
        now: DateTime<Utc>,
    ) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, r| !r.is_expired(now));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serves reports through an owned [`SuitabilityCache`].
#[derive(Debug, Default)]
pub struct GeospatialService {
    cache: SuitabilityCache,
}

impl GeospatialService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suitability(
        &mut self,
        coordinates: Coordinates,
    ) -> SatelliteSuitability {
        self.suitability_at(coordinates, Utc::now())
    }

    /// Returns the cached report if still valid at `now`, otherwise
    /// generates and caches a new one. The returned report always carries
    /// the requested coordinates, even when served from a nearby entry.
    pub fn suitability_at(
        &mut self,
        coordinates: Coordinates,
        now: DateTime<Utc>,
    ) -> SatelliteSuitability {
        let key = cache_key(coordinates);
        if let Some(report) = self.cache.get(&key, now) {
            debug!(%key, "Suitability cache hit");
            return SatelliteSuitability {
                coordinates,
                ..report.clone()
            };
        }

        debug!(%key, "Generating suitability report");
        let report = generate(coordinates, now);
        self.cache.insert(key, report.clone());
        report
    }

    pub fn cache(&self) -> &SuitabilityCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    // =========================================================================
    // generate
    // =========================================================================

    #[test]
    fn darjeeling_core_is_excellent() {
        let report = generate(Coordinates::new(27.036, 88.2627), t0());

        assert_eq!(report.region, "Darjeeling Hills");
        assert_eq!(report.suitability, Suitability::Excellent);
        assert_eq!(report.score, 92);
        assert_eq!(report.soil.drainage, "well-drained");
        assert_eq!(report.topography.elevation_m, 1800.0);
    }

    #[test]
    fn region_order() {
        assert_eq!(generate(Coordinates::new(26.0, 89.0), t0()).score, 75);
        assert_eq!(generate(Coordinates::new(22.0, 80.0), t0()).score, 55);
        assert_eq!(generate(Coordinates::new(51.5, -0.1), t0()).score, 25);
    }

    #[test]
    fn sub_fields_follow_score_thresholds() {
        let moderate = generate(Coordinates::new(22.0, 80.0), t0());
        assert_eq!(moderate.soil.ph, 6.5);
        assert_eq!(moderate.climate.annual_rainfall_mm, 1200.0);

        let poor = generate(Coordinates::new(51.5, -0.1), t0());
        assert_eq!(poor.suitability, Suitability::Poor);
        assert_eq!(poor.region, UNMAPPED_REGION);
        assert_eq!(poor.soil.drainage, "poor");
        assert_eq!(poor.climate.humidity_pct, 50.0);
    }

    #[test]
    fn expiry_is_thirty_days_out() {
        let report = generate(Coordinates::new(27.0, 88.3), t0());

        assert_eq!(report.generated_at, t0());
        assert_eq!(report.expires_at, Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn cache_key_uses_four_decimals() {
        assert_eq!(cache_key(Coordinates::new(27.03612, 88.2627)), "27.0361,88.2627");
        assert_eq!(cache_key(Coordinates::new(-1.0, 2.5)), "-1.0000,2.5000");
    }

    // =========================================================================
    // SuitabilityCache / GeospatialService
    // =========================================================================

    #[test]
    fn second_request_hits_cache() {
        let mut service = GeospatialService::new();
        let coords = Coordinates::new(27.0, 88.3);

        let first = service.suitability_at(coords, t0());
        let second = service.suitability_at(coords, t0() + Duration::days(10));

        assert_eq!(second.generated_at, first.generated_at);
        assert_eq!(service.cache().len(), 1);
    }

    #[test]
    fn nearby_points_share_an_entry() {
        let mut service = GeospatialService::new();

        service.suitability_at(Coordinates::new(27.00001, 88.30001), t0());
        service.suitability_at(Coordinates::new(27.00002, 88.30002), t0());

        assert_eq!(service.cache().len(), 1);
    }

    #[test]
    fn cache_hit_reports_requested_coordinates() {
        let mut service = GeospatialService::new();
        let first = Coordinates::new(27.00001, 88.30001);
        let second = Coordinates::new(27.00002, 88.30002);

        let cached = service.suitability_at(first, t0());
        let report = service.suitability_at(second, t0() + Duration::days(1));

        assert_eq!(report.coordinates, second);
        assert_eq!(report.generated_at, cached.generated_at);
        assert_eq!(report.region, cached.region);
    }

    #[test]
    fn expired_entry_is_regenerated() {
        let mut service = GeospatialService::new();
        let coords = Coordinates::new(27.0, 88.3);
        service.suitability_at(coords, t0());

        let later = t0() + Duration::days(31);
        let report = service.suitability_at(coords, later);

        assert_eq!(report.generated_at, later);
        assert_eq!(service.cache().len(), 1);
    }

    #[test]
    fn get_drops_expired_entry() {
        let mut cache = SuitabilityCache::new();
        let coords = Coordinates::new(27.0, 88.3);
        cache.insert(cache_key(coords), generate(coords, t0()));

        assert!(cache.get("27.0000,88.3000", t0() + Duration::days(29)).is_some());
        assert!(cache.get("27.0000,88.3000", t0() + Duration::days(30)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn purge_removes_only_expired() {
        let mut cache = SuitabilityCache::new();
        let old = Coordinates::new(27.0, 88.3);
        let fresh = Coordinates::new(22.0, 80.0);
        cache.insert(cache_key(old), generate(old, t0()));
        cache.insert(cache_key(fresh), generate(fresh, t0() + Duration::days(20)));

        let removed = cache.purge_expired(t0() + Duration::days(35));

        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
    }
}
