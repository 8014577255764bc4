//! Farm loan eligibility.
//!
//! Uses a fixed agricultural term loan: 8.5% per annum over 7 years with
//! monthly instalments. The maximum loan is the smaller of 80% of the
//! investment and ten times annual income; the applicant is eligible when
//! that maximum covers at least half of the investment.
//!
//! EMI uses the standard amortising formula
//! `P × r × (1 + r)^n / ((1 + r)^n − 1)` with `r` the monthly rate and `n`
//! the number of instalments.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// Annual interest rate.
pub const LOAN_INTEREST_RATE: Decimal = Decimal::from_parts(85, 0, 0, false, 3);

/// Loan tenure in years.
pub const LOAN_TENURE_YEARS: u32 = 7;

/// Share of the investment a lender will finance.
pub const LOAN_TO_VALUE: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Maximum loan as a multiple of annual income.
pub const INCOME_MULTIPLE: Decimal = Decimal::TEN;

/// Share of the investment the loan must cover to be eligible.
pub const MIN_COVERAGE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanEligibility {
    pub eligible: bool,
    pub max_loan: Decimal,
    pub interest_rate: Decimal,
    pub tenure_years: u32,
    pub monthly_emi: Decimal,
    pub total_repayment: Decimal,
    pub total_interest: Decimal,
}

/// Checks loan eligibility for an `investment` given the applicant's
/// `annual_income`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use darjberry_core::calculations::calculate_loan_eligibility;
///
/// assert!(calculate_loan_eligibility(dec!(1000000), dec!(1000000)).eligible);
/// assert!(!calculate_loan_eligibility(dec!(1000000), dec!(10000)).eligible);
/// ```
pub fn calculate_loan_eligibility(
    investment: Decimal,
    annual_income: Decimal,
) -> LoanEligibility {
    let max_loan = investment
        .saturating_mul(LOAN_TO_VALUE)
        .min(annual_income.saturating_mul(INCOME_MULTIPLE));
    let instalments = u64::from(LOAN_TENURE_YEARS * 12);
    let monthly_emi = round_half_up(emi(max_loan, LOAN_INTEREST_RATE, instalments));
    let total_repayment = monthly_emi.saturating_mul(Decimal::from(instalments));

    LoanEligibility {
        eligible: max_loan >= investment.saturating_mul(MIN_COVERAGE),
        max_loan,
        interest_rate: LOAN_INTEREST_RATE,
        tenure_years: LOAN_TENURE_YEARS,
        monthly_emi,
        total_repayment,
        total_interest: total_repayment.saturating_sub(max_loan),
    }
}

/// Equated monthly instalment for `principal` at `annual_rate` over
/// `instalments` months. Zero for a non-positive principal; clamped when
/// the instalment does not fit a `Decimal`.
pub fn emi(
    principal: Decimal,
    annual_rate: Decimal,
    instalments: u64,
) -> Decimal {
    if principal <= Decimal::ZERO || instalments == 0 {
        return Decimal::ZERO;
    }
    let monthly_rate = annual_rate / Decimal::from(12);
    if monthly_rate.is_zero() {
        return principal / Decimal::from(instalments);
    }
    let per_unit = (Decimal::ONE + monthly_rate)
        .checked_powu(instalments)
        .and_then(|factor| {
            let denominator = factor.checked_sub(Decimal::ONE)?;
            monthly_rate.saturating_mul(factor).checked_div(denominator)
        })
        .unwrap_or(monthly_rate);
    principal.saturating_mul(per_unit)
}
