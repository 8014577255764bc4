//! Location feasibility: district lookup, scoring and geospatial reports.

pub mod analyzer;
pub mod geospatial;
pub mod regions;
pub mod scoring;

pub use analyzer::{LocationAnalyzer, analyze};
pub use geospatial::{GeospatialService, SatelliteSuitability, SuitabilityCache};
pub use regions::BoundingBox;
pub use scoring::{recommendations, suitability_score};
