//! Plot-size recommendation.
//!
//! Classifies an acreage into one of seven bands. Each band's upper bound
//! is inclusive; anything above 50 acres falls into the catch-all.
//!
//! | Acres        | Recommended | Band |
//! |--------------|-------------|------|
//! | < 0.25       | no          | below viable plot size |
//! | 0.25 – 1     | yes         | beginner |
//! | 1 – 2        | yes         | family farm |
//! | 2 – 5        | yes         | commercial |
//! | 5 – 20       | yes         | large commercial |
//! | 20 – 50      | yes         | estate, phased |
//! | > 50         | no          | beyond managed capacity |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleRecommendation {
    pub recommended: bool,
    pub reason: String,
    /// Suggestions worth considering instead of (or alongside) the plan.
    pub alternatives: Vec<String>,
}

impl ScaleRecommendation {
    fn new(
        recommended: bool,
        reason: &str,
        alternatives: &[&str],
    ) -> Self {
        Self {
            recommended,
            reason: reason.to_string(),
            alternatives: alternatives.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Recommends for or against a plot of `acres`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use darjberry_core::calculations::get_scale_recommendation;
///
/// assert!(get_scale_recommendation(dec!(0.5)).recommended);
/// assert!(!get_scale_recommendation(dec!(0.1)).recommended);
/// ```
pub fn get_scale_recommendation(acres: Decimal) -> ScaleRecommendation {
    if acres < Decimal::new(25, 2) {
        ScaleRecommendation::new(
            false,
            "Plots under a quarter acre cannot carry the fixed polyhouse and management costs.",
            &[
                "Start with at least 0.25 acres (550 plants)",
                "Pool land with neighbours into a shared managed plot",
            ],
        )
    } else if acres <= Decimal::ONE {
        ScaleRecommendation::new(
            true,
            "Ideal size for beginners: low capital at risk while learning the crop cycle.",
            &[],
        )
    } else if acres <= Decimal::TWO {
        ScaleRecommendation::new(
            true,
            "Good size for a family farm with a single polyhouse cluster.",
            &[],
        )
    } else if acres <= Decimal::from(5) {
        ScaleRecommendation::new(
            true,
            "Commercial scale with room for direct supply to retail buyers.",
            &[],
        )
    } else if acres <= Decimal::from(20) {
        ScaleRecommendation::new(
            true,
            "Large commercial operation; dedicated on-site management is required.",
            &[
                "Plant in two phases to validate yields before full build-out",
                "Secure an offtake agreement before the third year",
            ],
        )
    } else if acres <= Decimal::from(50) {
        ScaleRecommendation::new(
            true,
            "Estate scale is viable only with phased development.",
            &[
                "Develop 10 acres per year over several seasons",
                "Add on-site cold storage and packhouse capacity",
            ],
        )
    } else {
        ScaleRecommendation::new(
            false,
            "Above 50 acres exceeds current managed-farm capacity.",
            &[
                "Start with a 20-50 acre first phase",
                "Split the land across several managed plots",
                "Discuss a custom partnership for estate-scale projects",
            ],
        )
    }
}
