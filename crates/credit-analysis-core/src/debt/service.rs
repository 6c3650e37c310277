use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::obligation::DebtObligation;
use crate::types::*;
use crate::CreditAnalysisResult;

/// Which obligations count toward debt service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtServiceBasis {
    /// Existing debt only.
    #[default]
    Current,
    /// Existing plus proposed debt.
    ProForma,
}

impl DebtServiceBasis {
    pub fn includes(self, obligation: &DebtObligation) -> bool {
        match self {
            DebtServiceBasis::Current => !obligation.is_proposed,
            DebtServiceBasis::ProForma => true,
        }
    }
}

/// Total annual debt service (monthly payment x 12) over the obligations the
/// basis selects. An empty list yields zero.
pub fn annual_debt_service(obligations: &[DebtObligation], basis: DebtServiceBasis) -> Money {
    obligations
        .iter()
        .filter(|o| basis.includes(o))
        .map(DebtObligation::annual_payment)
        .sum()
}

/// `annual_debt_service` with overflow reported as `InvalidInput` on the
/// offending obligation.
pub fn checked_annual_debt_service(
    obligations: &[DebtObligation],
    basis: DebtServiceBasis,
) -> CreditAnalysisResult<Money> {
    let payments = obligations
        .iter()
        .filter(|o| basis.includes(o))
        .map(DebtObligation::checked_annual_payment)
        .collect::<CreditAnalysisResult<Vec<Money>>>()?;
    checked_sum(payments, "debts.monthly_payment")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtServiceInput {
    pub obligations: Vec<DebtObligation>,
    #[serde(default)]
    pub basis: DebtServiceBasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtServiceOutput {
    pub basis: DebtServiceBasis,
    pub annual_debt_service: Money,
    pub current_annual_debt_service: Money,
    pub pro_forma_annual_debt_service: Money,
    pub total_current_balance: Money,
    pub obligation_count: usize,
    pub proposed_count: usize,
}

/// Annual debt service on both bases, reporting the requested one.
pub fn calculate_debt_service(
    input: &DebtServiceInput,
) -> CreditAnalysisResult<ComputationOutput<DebtServiceOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for ob in &input.obligations {
        if ob.current_balance > ob.original_balance {
            warnings.push(format!(
                "Obligation '{}' has a current balance above its original balance.",
                ob.id
            ));
        }
        if ob.monthly_payment.is_sign_negative() {
            warnings.push(format!("Obligation '{}' has a negative monthly payment.", ob.id));
        }
    }

    let current = checked_annual_debt_service(&input.obligations, DebtServiceBasis::Current)?;
    let pro_forma = checked_annual_debt_service(&input.obligations, DebtServiceBasis::ProForma)?;
    let total_current_balance = checked_sum(
        input.obligations.iter().map(|o| o.current_balance),
        "obligations.current_balance",
    )?;

    let output = DebtServiceOutput {
        basis: input.basis,
        annual_debt_service: match input.basis {
            DebtServiceBasis::Current => current,
            DebtServiceBasis::ProForma => pro_forma,
        },
        current_annual_debt_service: current,
        pro_forma_annual_debt_service: pro_forma,
        total_current_balance,
        obligation_count: input.obligations.len(),
        proposed_count: input.obligations.iter().filter(|o| o.is_proposed).count(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "annualisation": "monthly payment x 12",
        "current_excludes_proposed": true,
    });

    Ok(with_metadata(
        "Annual debt service",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debt::DebtType;
    use crate::CreditAnalysisError;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn obligation(id: &str, monthly: Decimal, is_proposed: bool) -> DebtObligation {
        DebtObligation {
            id: id.into(),
            lender: "First National Bank".into(),
            debt_type: DebtType::Term,
            original_balance: dec!(1_000_000),
            current_balance: dec!(800_000),
            interest_rate: dec!(6.25),
            monthly_payment: monthly,
            maturity_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            is_proposed,
        }
    }

    #[test]
    fn test_empty_list_is_zero() {
        assert_eq!(annual_debt_service(&[], DebtServiceBasis::Current), Decimal::ZERO);
        assert_eq!(annual_debt_service(&[], DebtServiceBasis::ProForma), Decimal::ZERO);
    }

    #[test]
    fn test_current_excludes_proposed() {
        let debts = vec![
            obligation("d1", dec!(14_500), false),
            obligation("d2", dec!(1_156), false),
            obligation("d3", dec!(7_669.14), true),
        ];
        // (14,500 + 1,156) x 12
        assert_eq!(annual_debt_service(&debts, DebtServiceBasis::Current), dec!(187_872));
    }

    #[test]
    fn test_pro_forma_includes_proposed() {
        let debts = vec![
            obligation("d1", dec!(14_500), false),
            obligation("d3", dec!(5_000), true),
        ];
        assert_eq!(annual_debt_service(&debts, DebtServiceBasis::ProForma), dec!(234_000));
    }

    #[test]
    fn test_calculate_debt_service_reports_both_bases() {
        let input = DebtServiceInput {
            obligations: vec![
                obligation("d1", dec!(3_200), false),
                obligation("d2", dec!(1_150), false),
                obligation("d3", dec!(1_000), true),
            ],
            basis: DebtServiceBasis::Current,
        };
        let out = calculate_debt_service(&input).unwrap();
        let r = &out.result;
        assert_eq!(r.annual_debt_service, dec!(52_200));
        assert_eq!(r.current_annual_debt_service, dec!(52_200));
        assert_eq!(r.pro_forma_annual_debt_service, dec!(64_200));
        assert_eq!(r.obligation_count, 3);
        assert_eq!(r.proposed_count, 1);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_balance_above_original_warns_only() {
        let mut ob = obligation("d1", dec!(1_000), false);
        ob.current_balance = dec!(2_000_000);
        let out = calculate_debt_service(&DebtServiceInput {
            obligations: vec![ob],
            basis: DebtServiceBasis::ProForma,
        })
        .unwrap();
        assert_eq!(out.result.annual_debt_service, dec!(12_000));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_oversized_payment_rejected_not_panicking() {
        let input = DebtServiceInput {
            obligations: vec![obligation("jumbo", dec!(7_000_000_000_000_000_000_000_000_000), false)],
            basis: DebtServiceBasis::Current,
        };
        match calculate_debt_service(&input).unwrap_err() {
            CreditAnalysisError::InvalidInput { field, .. } => {
                assert_eq!(field, "debts[jumbo].monthly_payment")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_checked_matches_plain_when_in_range() {
        let debts = vec![
            obligation("d1", dec!(14_500), false),
            obligation("d2", dec!(7_669.14), true),
        ];
        for basis in [DebtServiceBasis::Current, DebtServiceBasis::ProForma] {
            assert_eq!(
                checked_annual_debt_service(&debts, basis).unwrap(),
                annual_debt_service(&debts, basis)
            );
        }
    }

    #[test]
    fn test_basis_serializes_snake_case() {
        let json = serde_json::to_string(&DebtServiceBasis::ProForma).unwrap();
        assert_eq!(json, "\"pro_forma\"");
    }
}
