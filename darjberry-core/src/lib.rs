//! Projection and feasibility engine for managed blueberry farms.
//!
//! The crate is split into three layers:
//!
//! * [`calculations`]: the investment calculator and the subsidy, tea-estate,
//!   scale and loan helpers built on its output.
//! * [`location`]: district lookup, suitability scoring and the coarse
//!   geospatial report generator.
//! * [`db`]: the repository trait and backend registry used to persist
//!   saved calculations and location checks.

pub mod calculations;
pub mod db;
pub mod location;
pub mod models;

pub use db::repository::{FarmRepository, RepositoryError};
pub use models::*;
