//! Static district table for North Bengal.

use crate::models::{Suitability, TemperatureRange};

/// An inclusive latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub const fn new(
        min_lat: f64,
        max_lat: f64,
        min_lng: f64,
        max_lng: f64,
    ) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// True when the point lies inside or on the edge of the box.
    /// NaN coordinates are never contained.
    pub fn contains(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lng..=self.max_lng).contains(&longitude)
    }
}

/// Agronomic attributes of a district.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistrictProfile {
    /// Lookup key, lowercase.
    pub key: &'static str,
    pub location: &'static str,
    pub district: &'static str,
    pub bounds: BoundingBox,
    pub soil_ph: f64,
    pub climate_score: u8,
    pub suitability: Suitability,
    pub elevation: f64,
    pub rainfall: f64,
    pub temperature: TemperatureRange,
}

/// The whole North Bengal area. Points inside it that miss every district
/// box fall back to [`FALLBACK_DISTRICT`].
pub const NORTH_BENGAL: BoundingBox = BoundingBox::new(25.0, 27.5, 87.5, 90.0);

pub const FALLBACK_DISTRICT: &str = "jalpaiguri";

/// Districts in lookup order. The first box containing a point wins, so
/// Darjeeling shadows the part of Kurseong and Mirik it overlaps.
pub const DISTRICTS: [DistrictProfile; 7] = [
    DistrictProfile {
        key: "darjeeling",
        location: "Darjeeling Hills, West Bengal",
        district: "Darjeeling",
        bounds: BoundingBox::new(26.85, 27.25, 87.95, 88.55),
        soil_ph: 5.0,
        climate_score: 95,
        suitability: Suitability::Excellent,
        elevation: 2000.0,
        rainfall: 2800.0,
        temperature: TemperatureRange { min: 2.0, max: 25.0 },
    },
    DistrictProfile {
        key: "kurseong",
        location: "Kurseong, West Bengal",
        district: "Kurseong",
        bounds: BoundingBox::new(26.80, 26.95, 88.20, 88.35),
        soil_ph: 5.2,
        climate_score: 92,
        suitability: Suitability::Excellent,
        elevation: 1450.0,
        rainfall: 3500.0,
        temperature: TemperatureRange { min: 6.0, max: 27.0 },
    },
    DistrictProfile {
        key: "kalimpong",
        location: "Kalimpong, West Bengal",
        district: "Kalimpong",
        bounds: BoundingBox::new(26.95, 27.25, 88.55, 88.85),
        soil_ph: 5.5,
        climate_score: 88,
        suitability: Suitability::Good,
        elevation: 1250.0,
        rainfall: 2200.0,
        temperature: TemperatureRange { min: 7.0, max: 28.0 },
    },
    DistrictProfile {
        key: "mirik",
        location: "Mirik, West Bengal",
        district: "Mirik",
        bounds: BoundingBox::new(26.78, 26.90, 88.05, 88.20),
        soil_ph: 5.3,
        climate_score: 90,
        suitability: Suitability::Excellent,
        elevation: 1500.0,
        rainfall: 2500.0,
        temperature: TemperatureRange { min: 5.0, max: 26.0 },
    },
    DistrictProfile {
        key: "siliguri",
        location: "Siliguri, West Bengal",
        district: "Siliguri",
        bounds: BoundingBox::new(26.60, 26.80, 88.30, 88.50),
        soil_ph: 6.2,
        climate_score: 65,
        suitability: Suitability::Moderate,
        elevation: 120.0,
        rainfall: 3200.0,
        temperature: TemperatureRange { min: 10.0, max: 35.0 },
    },
    DistrictProfile {
        key: "jalpaiguri",
        location: "Jalpaiguri, West Bengal",
        district: "Jalpaiguri",
        bounds: BoundingBox::new(26.40, 26.80, 88.50, 89.00),
        soil_ph: 6.0,
        climate_score: 60,
        suitability: Suitability::Moderate,
        elevation: 90.0,
        rainfall: 3400.0,
        temperature: TemperatureRange { min: 11.0, max: 34.0 },
    },
    DistrictProfile {
        key: "alipurduar",
        location: "Alipurduar, West Bengal",
        district: "Alipurduar",
        bounds: BoundingBox::new(26.40, 26.90, 89.00, 89.90),
        soil_ph: 6.5,
        climate_score: 55,
        suitability: Suitability::Poor,
        elevation: 70.0,
        rainfall: 4000.0,
        temperature: TemperatureRange { min: 12.0, max: 33.0 },
    },
];

/// Returned for any point outside North Bengal.
pub const OUTSIDE_REGION: DistrictProfile = DistrictProfile {
    key: "unknown",
    location: "Outside North Bengal region",
    district: "Unknown",
    bounds: BoundingBox::new(0.0, 0.0, 0.0, 0.0),
    soil_ph: 7.0,
    climate_score: 40,
    suitability: Suitability::Poor,
    elevation: 0.0,
    rainfall: 1000.0,
    temperature: TemperatureRange { min: 15.0, max: 40.0 },
};

/// Looks up a district by its lowercase key.
pub fn district(key: &str) -> Option<&'static DistrictProfile> {
    DISTRICTS.iter().find(|d| d.key == key)
}

/// First district whose box contains the point.
pub fn district_at(
    latitude: f64,
    longitude: f64,
) -> Option<&'static DistrictProfile> {
    DISTRICTS
        .iter()
        .find(|d| d.bounds.contains(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn box_edges_are_inclusive() {
        let b = BoundingBox::new(1.0, 2.0, 3.0, 4.0);

        assert!(b.contains(1.0, 3.0));
        assert!(b.contains(2.0, 4.0));
        assert!(!b.contains(2.01, 3.5));
        assert!(!b.contains(1.5, 2.99));
    }

    #[test]
    fn nan_is_never_contained() {
        assert!(!NORTH_BENGAL.contains(f64::NAN, 88.0));
        assert!(!NORTH_BENGAL.contains(26.0, f64::NAN));
    }

    #[test]
    fn darjeeling_shadows_overlapping_kurseong() {
        // Inside both boxes
        assert_eq!(district_at(26.90, 88.28).map(|d| d.key), Some("darjeeling"));
        // Kurseong only
        assert_eq!(district_at(26.82, 88.28).map(|d| d.key), Some("kurseong"));
    }

    #[test]
    fn each_district_resolves_at_a_point_of_its_own() {
        let cases = [
            (27.036, 88.2627, "darjeeling"),
            (26.82, 88.28, "kurseong"),
            (27.06, 88.65, "kalimpong"),
            (26.80, 88.10, "mirik"),
            (26.71, 88.43, "siliguri"),
            (26.52, 88.72, "jalpaiguri"),
            (26.49, 89.53, "alipurduar"),
        ];

        for (lat, lng, expected) in cases {
            assert_eq!(district_at(lat, lng).map(|d| d.key), Some(expected), "({lat}, {lng})");
        }
    }

    #[test]
    fn fallback_district_exists() {
        assert!(district(FALLBACK_DISTRICT).is_some());
    }

    #[test]
    fn district_boxes_lie_inside_north_bengal() {
        for d in &DISTRICTS {
            assert!(NORTH_BENGAL.contains(d.bounds.min_lat, d.bounds.min_lng), "{}", d.key);
            assert!(NORTH_BENGAL.contains(d.bounds.max_lat, d.bounds.max_lng), "{}", d.key);
        }
    }
}
