use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::obligation::{DebtObligation, DebtType, MONTHS_PER_YEAR};
use crate::types::*;
use crate::{CreditAnalysisError, CreditAnalysisResult};

/// Terms of a new loan being modelled against the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedLoan {
    /// Entity that would carry the loan.
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lender: Option<String>,
    pub amount: Money,
    /// Annual rate as a percentage (7.5 = 7.5%).
    pub interest_rate: Percent,
    pub term_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedLoanPayment {
    pub entity_id: String,
    pub amount: Money,
    pub monthly_payment: Money,
    pub annual_debt_service: Money,
}

/// Level monthly payment that fully amortizes the loan over its term,
/// rounded to cents.
pub fn monthly_payment(loan: &ProposedLoan) -> CreditAnalysisResult<Money> {
    if loan.amount <= Decimal::ZERO {
        return Err(CreditAnalysisError::InvalidInput {
            field: "amount".into(),
            reason: "Loan amount must be positive.".into(),
        });
    }
    if loan.term_months == 0 {
        return Err(CreditAnalysisError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one month.".into(),
        });
    }
    if loan.interest_rate < Decimal::ZERO {
        return Err(CreditAnalysisError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Interest rate cannot be negative.".into(),
        });
    }

    let periods = Decimal::from(loan.term_months);
    let monthly_rate = loan.interest_rate / dec!(100) / MONTHS_PER_YEAR;

    if monthly_rate.is_zero() {
        return Ok((loan.amount / periods).round_dp(2));
    }

    let factor = (Decimal::ONE + monthly_rate)
        .checked_powu(u64::from(loan.term_months))
        .ok_or_else(|| CreditAnalysisError::InvalidInput {
            field: "term_months".into(),
            reason: "Compounding factor overflows for this rate and term.".into(),
        })?;
    let annuity_factor = factor - Decimal::ONE;
    if annuity_factor.is_zero() {
        return Err(CreditAnalysisError::DivisionByZero {
            context: "loan payment annuity factor".into(),
        });
    }

    // Payment per unit of principal first; it stays near the monthly rate,
    // so only the final scaling by the amount can overflow.
    let per_unit = monthly_rate
        .checked_mul(factor)
        .and_then(|v| v.checked_div(annuity_factor))
        .ok_or_else(|| CreditAnalysisError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Payment factor overflows for this rate and term.".into(),
        })?;
    let payment = loan
        .amount
        .checked_mul(per_unit)
        .ok_or_else(|| CreditAnalysisError::InvalidInput {
            field: "amount".into(),
            reason: "Monthly payment exceeds the representable decimal range.".into(),
        })?;

    Ok(payment.round_dp(2))
}

impl ProposedLoan {
    pub fn payment(&self) -> CreditAnalysisResult<ProposedLoanPayment> {
        let monthly = monthly_payment(self)?;
        Ok(ProposedLoanPayment {
            entity_id: self.entity_id.clone(),
            amount: self.amount,
            monthly_payment: monthly,
            annual_debt_service: monthly.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
                CreditAnalysisError::InvalidInput {
                    field: "amount".into(),
                    reason: "Annual debt service exceeds the representable decimal range.".into(),
                }
            })?,
        })
    }

    /// Express the loan as a proposed obligation originated on `as_of`.
    pub fn to_obligation(&self, id: &str, as_of: NaiveDate) -> CreditAnalysisResult<DebtObligation> {
        let monthly = monthly_payment(self)?;
        let maturity_date = as_of
            .checked_add_months(Months::new(self.term_months))
            .ok_or_else(|| CreditAnalysisError::InvalidInput {
                field: "term_months".into(),
                reason: "Maturity date is out of range.".into(),
            })?;

        Ok(DebtObligation {
            id: id.to_string(),
            lender: self.lender.clone().unwrap_or_else(|| "Proposed".to_string()),
            debt_type: DebtType::Term,
            original_balance: self.amount,
            current_balance: self.amount,
            interest_rate: self.interest_rate,
            monthly_payment: monthly,
            maturity_date,
            is_proposed: true,
        })
    }
}

/// Payment schedule summary for a single proposed loan.
pub fn calculate_loan_payment(
    loan: &ProposedLoan,
) -> CreditAnalysisResult<ComputationOutput<ProposedLoanPayment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let payment = loan.payment()?;
    if loan.interest_rate.is_zero() {
        warnings.push("Zero interest rate; payment is straight-line principal.".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "amortization": "level monthly payment over the full term",
        "rounding": "cents",
    });

    Ok(with_metadata(
        "Level-payment amortization",
        &assumptions,
        warnings,
        elapsed,
        payment,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(amount: Decimal, rate: Decimal, term: u32) -> ProposedLoan {
        ProposedLoan {
            entity_id: "entity-1".into(),
            lender: None,
            amount,
            interest_rate: rate,
            term_months: term,
        }
    }

    #[test]
    fn test_standard_amortization() {
        // 500k at 7.5% over 84 months ≈ 7,669.14
        let pmt = monthly_payment(&loan(dec!(500_000), dec!(7.5), 84)).unwrap();
        assert_eq!(pmt, dec!(7669.14));
    }

    #[test]
    fn test_five_year_note() {
        let pmt = monthly_payment(&loan(dec!(120_000), dec!(6), 60)).unwrap();
        assert_eq!(pmt, dec!(2319.94));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let pmt = monthly_payment(&loan(dec!(120_000), Decimal::ZERO, 48)).unwrap();
        assert_eq!(pmt, dec!(2500));
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = monthly_payment(&loan(dec!(100_000), dec!(5), 0)).unwrap_err();
        match err {
            CreditAnalysisError::InvalidInput { field, .. } => assert_eq!(field, "term_months"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_extreme_rate_long_term_returns_payment() {
        // (1 + r)^360 is about 1.6e24 here; the payment is effectively
        // interest-only.
        let pmt = monthly_payment(&loan(dec!(1_000_000), dec!(200), 360)).unwrap();
        assert_eq!(pmt, dec!(166_666.67));
    }

    #[test]
    fn test_unrepresentable_payment_rejected() {
        // Per-unit payment is about 2.08, so the product exceeds Decimal::MAX.
        let err = monthly_payment(&loan(Decimal::MAX / dec!(2), dec!(1300), 1)).unwrap_err();
        match err {
            CreditAnalysisError::InvalidInput { field, .. } => assert_eq!(field, "amount"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_annual_service_overflow_rejected() {
        // Monthly payment fits but twelve of them do not.
        let amount = Decimal::MAX / dec!(10);
        assert!(monthly_payment(&loan(amount, Decimal::ZERO, 1)).is_ok());
        assert!(loan(amount, Decimal::ZERO, 1).payment().is_err());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        assert!(monthly_payment(&loan(Decimal::ZERO, dec!(5), 12)).is_err());
        assert!(monthly_payment(&loan(dec!(-1), dec!(5), 12)).is_err());
    }

    #[test]
    fn test_calculate_loan_payment_envelope() {
        let out = calculate_loan_payment(&loan(dec!(500_000), dec!(7.5), 84)).unwrap();
        assert_eq!(out.result.monthly_payment, dec!(7669.14));
        assert_eq!(out.result.annual_debt_service, dec!(92_029.68));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_to_obligation_is_proposed() {
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let ob = loan(dec!(500_000), dec!(7.5), 84)
            .to_obligation("proposed-1", as_of)
            .unwrap();
        assert!(ob.is_proposed);
        assert_eq!(ob.debt_type, DebtType::Term);
        assert_eq!(ob.lender, "Proposed");
        assert_eq!(ob.monthly_payment, dec!(7669.14));
        assert_eq!(ob.maturity_date, NaiveDate::from_ymd_opt(2031, 1, 31).unwrap());
    }
}
