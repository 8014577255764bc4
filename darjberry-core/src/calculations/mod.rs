//! Investment calculations for managed blueberry plots.
//!
//! [`investment`] produces the core projection; the other modules derive
//! subsidy, comparison, scale and loan figures from it or from the same
//! inputs.

pub mod common;
pub mod comparison;
pub mod investment;
pub mod loan;
pub mod scale;
pub mod subsidy;

pub use comparison::{ModelSummary, TeaEstateComparison, compare_with_tea_estate};
pub use investment::{
    CalculatorConfigError, DEFAULT_PRICE_PER_KG, InvestmentCalculator, InvestmentConfig,
    calculate,
};
pub use loan::{LoanEligibility, calculate_loan_eligibility};
pub use scale::{ScaleRecommendation, get_scale_recommendation};
pub use subsidy::{SubsidyBenefit, calculate_subsidy_benefit};
