use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::global::{
    aggregate_global_dscr, check_magnitudes, collect_warnings, GlobalDscr, AUDIT_TARGET,
};
use super::policy::DscrPolicy;
use crate::borrower::BorrowerGroup;
use crate::cash_flow::Adjustment;
use crate::debt::{DebtServiceBasis, ProposedLoan, ProposedLoanPayment};
use crate::types::*;
use crate::{CreditAnalysisError, CreditAnalysisResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProFormaInput {
    pub borrower_group: BorrowerGroup,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    #[serde(default)]
    pub policy: DscrPolicy,
    #[serde(default)]
    pub proposed_loans: Vec<ProposedLoan>,
    /// Origination date for proposed loans; defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProFormaOutput {
    pub current: GlobalDscr,
    pub pro_forma: GlobalDscr,
    /// pro forma minus current global DSCR
    pub dscr_change: Multiple,
    pub proposed_annual_debt_service: Money,
    pub proposed_loans: Vec<ProposedLoanPayment>,
}

/// Global DSCR before and after the proposed loans are booked.
///
/// The caller's group is cloned; each loan is appended to its entity as a
/// proposed obligation and the pro forma side counts every proposed
/// obligation, including any already present in the input.
pub fn calculate_pro_forma_dscr(
    input: &ProFormaInput,
) -> CreditAnalysisResult<ComputationOutput<ProFormaOutput>> {
    let start = Instant::now();

    input.policy.validate()?;

    let as_of = input.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let mut group = input.borrower_group.clone();
    let mut proposed_loans: Vec<ProposedLoanPayment> = Vec::with_capacity(input.proposed_loans.len());

    for (i, loan) in input.proposed_loans.iter().enumerate() {
        let obligation = loan.to_obligation(&format!("proposed-{}", i + 1), as_of)?;
        let entity = group
            .entity_mut(&loan.entity_id)
            .ok_or_else(|| CreditAnalysisError::InvalidInput {
                field: format!("proposed_loans[{i}].entity_id"),
                reason: format!("No entity '{}' in the borrower group.", loan.entity_id),
            })?;
        entity.debts.push(obligation);
        proposed_loans.push(loan.payment()?);
    }

    for basis in [DebtServiceBasis::Current, DebtServiceBasis::ProForma] {
        check_magnitudes(&group, &input.adjustments, &input.policy, basis)?;
    }

    let current = aggregate_global_dscr(
        &group,
        &input.adjustments,
        &input.policy,
        DebtServiceBasis::Current,
    );
    let pro_forma = aggregate_global_dscr(
        &group,
        &input.adjustments,
        &input.policy,
        DebtServiceBasis::ProForma,
    );

    let mut warnings = collect_warnings(&group, &input.adjustments, &input.policy, &pro_forma);
    let base_warning_count = warnings.len();
    if pro_forma.total_debt_service == current.total_debt_service {
        warnings.push("No proposed debt service; pro forma equals current.".into());
    }
    for (loan, payment) in input.proposed_loans.iter().zip(&proposed_loans) {
        let included = group
            .entity(&loan.entity_id)
            .map(|e| e.include_in_global)
            .unwrap_or(false);
        if !included {
            warnings.push(format!(
                "Proposed loan of {} sits on excluded entity '{}'; it does not affect the global ratio.",
                payment.amount, loan.entity_id
            ));
        }
    }

    let proposed_annual_debt_service = checked_sum(
        proposed_loans.iter().map(|p| p.annual_debt_service),
        "proposed_loans.amount",
    )?;
    // Both ratios are clamped to the coverage cap, so the difference fits.
    let dscr_change = pro_forma.global_dscr - current.global_dscr;

    tracing::info!(
        target: AUDIT_TARGET,
        action = "dscr-calculated",
        borrower_group = %group.id,
        global_dscr = %current.global_dscr,
        pro_forma_dscr = %pro_forma.global_dscr,
        status = %pro_forma.status,
        proposed_loans = proposed_loans.len(),
        "pro forma DSCR calculated"
    );

    let output = ProFormaOutput {
        current,
        pro_forma,
        dscr_change,
        proposed_annual_debt_service,
        proposed_loans,
    };

    if output.weakens_coverage() {
        if output.current.status.meets_minimum() && !output.pro_forma.status.meets_minimum() {
            warnings.push(format!(
                "Proposed debt takes global DSCR from {}x to {}x, below the {}x minimum.",
                output.current.global_dscr.round_dp(2),
                output.pro_forma.global_dscr.round_dp(2),
                input.policy.minimum_dscr
            ));
        } else if output.pro_forma.status != output.current.status {
            warnings.push(format!(
                "Proposed debt moves global status from {} to {}.",
                output.current.status, output.pro_forma.status
            ));
        }
    }
    for w in warnings.iter().skip(base_warning_count) {
        tracing::warn!(borrower_group = %group.id, "{w}");
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "amortization": "level monthly payment, rounded to cents",
        "as_of": as_of,
        "include_guarantor_cash_flow": input.policy.include_guarantor_cash_flow,
        "proposed_debt_basis": "pro forma counts every obligation flagged is_proposed",
    });

    Ok(with_metadata(
        "Pro forma global DSCR (existing plus proposed debt service)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

impl ProFormaOutput {
    /// Pro forma coverage is lower than current coverage.
    pub fn weakens_coverage(&self) -> bool {
        self.dscr_change < Decimal::ZERO
    }
}
