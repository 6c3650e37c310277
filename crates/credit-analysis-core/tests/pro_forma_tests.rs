use chrono::NaiveDate;
use credit_analysis_core::debt::{annual_debt_service, DebtServiceBasis, ProposedLoan};
use credit_analysis_core::dscr::{calculate_pro_forma_dscr, DscrPolicy, DscrStatus, ProFormaInput};
use credit_analysis_core::fixtures::{smith_holdings, SMITH_MANUFACTURING, SMITH_PROPERTIES};
use credit_analysis_core::CreditAnalysisError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn equipment_loan(entity_id: &str) -> ProposedLoan {
    ProposedLoan {
        entity_id: entity_id.into(),
        lender: Some("First National Bank".into()),
        amount: dec!(500_000),
        interest_rate: dec!(7.5),
        term_months: 84,
    }
}

fn input(loans: Vec<ProposedLoan>) -> ProFormaInput {
    ProFormaInput {
        borrower_group: smith_holdings(),
        adjustments: vec![],
        policy: DscrPolicy::default(),
        proposed_loans: loans,
        as_of: NaiveDate::from_ymd_opt(2024, 1, 31),
    }
}

#[test]
fn test_pro_forma_adds_proposed_debt_service() {
    let out = calculate_pro_forma_dscr(&input(vec![equipment_loan(SMITH_MANUFACTURING)])).unwrap();
    let r = &out.result;

    assert_eq!(r.proposed_loans.len(), 1);
    assert_eq!(r.proposed_loans[0].monthly_payment, dec!(7669.14));
    assert_eq!(r.proposed_annual_debt_service, dec!(92_029.68));

    assert_eq!(r.current.total_debt_service, dec!(393_672));
    assert_eq!(r.current.basis, DebtServiceBasis::Current);
    assert_eq!(r.pro_forma.total_debt_service, dec!(485_701.68));
    assert_eq!(r.pro_forma.basis, DebtServiceBasis::ProForma);
    assert_eq!(r.pro_forma.combined_cash_flow, r.current.combined_cash_flow);

    assert_eq!(r.current.global_dscr.round_dp(2), dec!(2.07));
    assert_eq!(r.pro_forma.global_dscr.round_dp(2), dec!(1.68));
    assert_eq!(r.dscr_change.round_dp(2), dec!(-0.39));
    assert!(r.weakens_coverage());
    assert_eq!(r.pro_forma.status, DscrStatus::Pass);
}

#[test]
fn test_pro_forma_entity_breakdown_carries_new_loan() {
    let out = calculate_pro_forma_dscr(&input(vec![equipment_loan(SMITH_MANUFACTURING)])).unwrap();
    let mfg = &out.result.pro_forma.entity_breakdown[0];
    assert_eq!(mfg.debt_service, dec!(187_872) + dec!(92_029.68));
    // Current side of the same run ignores the proposed obligation.
    assert_eq!(out.result.current.entity_breakdown[0].debt_service, dec!(187_872));
}

#[test]
fn test_pro_forma_does_not_mutate_input() {
    let inp = input(vec![equipment_loan(SMITH_MANUFACTURING)]);
    let before = inp.borrower_group.clone();
    calculate_pro_forma_dscr(&inp).unwrap();
    assert_eq!(inp.borrower_group, before);
    assert_eq!(
        annual_debt_service(&inp.borrower_group.entities[0].debts, DebtServiceBasis::ProForma),
        dec!(187_872)
    );
}

#[test]
fn test_pro_forma_without_loans_equals_current() {
    let out = calculate_pro_forma_dscr(&input(vec![])).unwrap();
    assert_eq!(out.result.dscr_change, Decimal::ZERO);
    assert_eq!(out.result.proposed_annual_debt_service, Decimal::ZERO);
    assert!(out.warnings.iter().any(|w| w.contains("pro forma equals current")));
}

#[test]
fn test_pro_forma_on_excluded_entity_warns() {
    let mut inp = input(vec![equipment_loan(SMITH_PROPERTIES)]);
    inp.borrower_group.entities[1].include_in_global = false;
    let out = calculate_pro_forma_dscr(&inp).unwrap();
    assert_eq!(out.result.dscr_change, Decimal::ZERO);
    assert!(out.warnings.iter().any(|w| w.contains("excluded entity")));
}

#[test]
fn test_pro_forma_unknown_entity_rejected() {
    let err = calculate_pro_forma_dscr(&input(vec![equipment_loan("entity-99")])).unwrap_err();
    match err {
        CreditAnalysisError::InvalidInput { field, .. } => {
            assert_eq!(field, "proposed_loans[0].entity_id")
        }
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_pro_forma_invalid_loan_rejected() {
    let mut loan = equipment_loan(SMITH_MANUFACTURING);
    loan.term_months = 0;
    assert!(calculate_pro_forma_dscr(&input(vec![loan])).is_err());
}

#[test]
fn test_pro_forma_unrepresentable_loan_rejected() {
    let mut loan = equipment_loan(SMITH_MANUFACTURING);
    loan.amount = Decimal::MAX / dec!(2);
    loan.interest_rate = dec!(1300);
    loan.term_months = 1;
    match calculate_pro_forma_dscr(&input(vec![loan])).unwrap_err() {
        CreditAnalysisError::InvalidInput { field, .. } => assert_eq!(field, "amount"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_pro_forma_warns_when_loan_breaks_minimum() {
    let mut loan = equipment_loan(SMITH_MANUFACTURING);
    loan.amount = dec!(5_000_000);
    let out = calculate_pro_forma_dscr(&input(vec![loan])).unwrap();
    assert!(out.result.weakens_coverage());
    assert_eq!(out.result.pro_forma.status, DscrStatus::Fail);
    assert!(out.warnings.iter().any(|w| w.contains("below the 1.25x minimum")));
}
