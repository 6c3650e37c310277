use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::classifier::{entity_dscr, evaluate, DscrCalculation, DscrStatus, COVERAGE_CAP};
use super::policy::DscrPolicy;
use crate::borrower::BorrowerGroup;
use crate::cash_flow::{current_period, extract_entity_cash_flow, Adjustment};
use crate::debt::{annual_debt_service, checked_annual_debt_service, DebtServiceBasis};
use crate::types::*;
use crate::CreditAnalysisResult;

pub(crate) const AUDIT_TARGET: &str = "credit_analysis::audit";

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalDscrInput {
    pub borrower_group: BorrowerGroup,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    #[serde(default)]
    pub policy: DscrPolicy,
}

/// Coverage across every included entity and, when the policy allows,
/// every guarantor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalDscr {
    pub combined_cash_flow: Money,
    pub total_debt_service: Money,
    pub global_dscr: Multiple,
    pub policy_minimum: Multiple,
    pub status: DscrStatus,
    /// One entry per included entity, in group order. Guarantors are folded
    /// into the totals only.
    pub entity_breakdown: Vec<DscrCalculation>,
    pub guarantor_cash_flow: Money,
    pub guarantor_debt_service: Money,
    pub requires_exception: bool,
    pub basis: DebtServiceBasis,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Combine normalized entity cash flow and annual debt service across the
/// group. Reads the group, adjustments and policy without modifying them.
///
/// Arithmetic is unchecked; `calculate_global_dscr` runs
/// `check_magnitudes` first so that out-of-range input is rejected.
pub fn aggregate_global_dscr(
    group: &BorrowerGroup,
    adjustments: &[Adjustment],
    policy: &DscrPolicy,
    basis: DebtServiceBasis,
) -> GlobalDscr {
    let entity_breakdown: Vec<DscrCalculation> = group
        .included_entities()
        .map(|entity| {
            let cash_flow = extract_entity_cash_flow(entity, adjustments).normalized_cash_flow;
            let debt_service = annual_debt_service(&entity.debts, basis);
            entity_dscr(&entity.id, &entity.name, cash_flow, debt_service, policy)
        })
        .collect();

    let (guarantor_cash_flow, guarantor_debt_service) = if policy.include_guarantor_cash_flow {
        group
            .guarantors
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(cf, ds), g| {
                (
                    cf + g.personal_cash_flow,
                    ds + annual_debt_service(&g.personal_debt, basis),
                )
            })
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let combined_cash_flow = entity_breakdown.iter().map(|c| c.cash_flow).sum::<Money>()
        + guarantor_cash_flow;
    let total_debt_service = entity_breakdown.iter().map(|c| c.debt_service).sum::<Money>()
        + guarantor_debt_service;

    let (global_dscr, status) = evaluate(combined_cash_flow, total_debt_service, policy);
    let requires_exception =
        status != DscrStatus::NoDebtService && global_dscr < policy.exception_threshold();

    GlobalDscr {
        combined_cash_flow,
        total_debt_service,
        global_dscr,
        policy_minimum: policy.minimum_dscr,
        status,
        entity_breakdown,
        guarantor_cash_flow,
        guarantor_debt_service,
        requires_exception,
        basis,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Global DSCR on existing debt, with validation, warnings and an audit event.
pub fn calculate_global_dscr(
    input: &GlobalDscrInput,
) -> CreditAnalysisResult<ComputationOutput<GlobalDscr>> {
    let start = Instant::now();

    input.policy.validate()?;
    check_magnitudes(
        &input.borrower_group,
        &input.adjustments,
        &input.policy,
        DebtServiceBasis::Current,
    )?;

    let result = aggregate_global_dscr(
        &input.borrower_group,
        &input.adjustments,
        &input.policy,
        DebtServiceBasis::Current,
    );
    let warnings = collect_warnings(
        &input.borrower_group,
        &input.adjustments,
        &input.policy,
        &result,
    );

    tracing::info!(
        target: AUDIT_TARGET,
        action = "dscr-calculated",
        borrower_group = %input.borrower_group.id,
        global_dscr = %result.global_dscr,
        status = %result.status,
        entities = result.entity_breakdown.len(),
        "global DSCR calculated"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "cash_flow": "most recent period operating cash flow plus entity adjustments",
        "debt_service": "monthly payment x 12, existing obligations only",
        "include_guarantor_cash_flow": input.policy.include_guarantor_cash_flow,
        "minimum_dscr": input.policy.minimum_dscr,
        "marginal_dscr": input.policy.marginal_dscr,
        "overrides_change_impact": false,
    });

    Ok(with_metadata(
        "Global DSCR (combined cash flow / combined annual debt service)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Forms every sum `aggregate_global_dscr` forms, in the same order, with
/// checked arithmetic. `Ok` means the aggregation cannot overflow.
pub(crate) fn check_magnitudes(
    group: &BorrowerGroup,
    adjustments: &[Adjustment],
    policy: &DscrPolicy,
    basis: DebtServiceBasis,
) -> CreditAnalysisResult<()> {
    let mut cash_flows: Vec<Money> = Vec::new();
    let mut debt_services: Vec<Money> = Vec::new();

    for entity in group.included_entities() {
        let field = format!("entities[{}].cash_flow", entity.id);
        let operating = current_period(entity)
            .map(|p| p.cash_flow.operating_cash_flow)
            .unwrap_or(Decimal::ZERO);
        let adjustment_total = checked_sum(
            adjustments
                .iter()
                .filter(|a| a.applies_to(&entity.id))
                .map(|a| a.impact),
            &field,
        )?;
        cash_flows.push(checked_sum([operating, adjustment_total], &field)?);
        debt_services.push(checked_annual_debt_service(&entity.debts, basis)?);
    }

    if policy.include_guarantor_cash_flow {
        let guarantor_debt = group
            .guarantors
            .iter()
            .map(|g| checked_annual_debt_service(&g.personal_debt, basis))
            .collect::<CreditAnalysisResult<Vec<Money>>>()?;
        cash_flows.push(checked_sum(
            group.guarantors.iter().map(|g| g.personal_cash_flow),
            "guarantors.personal_cash_flow",
        )?);
        debt_services.push(checked_sum(guarantor_debt, "guarantors.personal_debt")?);
    }

    checked_sum(cash_flows, "combined_cash_flow")?;
    checked_sum(debt_services, "total_debt_service")?;
    Ok(())
}

pub(crate) fn collect_warnings(
    group: &BorrowerGroup,
    adjustments: &[Adjustment],
    policy: &DscrPolicy,
    result: &GlobalDscr,
) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();

    for entity in &group.entities {
        if !entity.include_in_global {
            warnings.push(format!("{} is excluded from the global ratio.", entity.name));
        } else if !entity.has_financials() {
            warnings.push(format!(
                "{} has no financial periods; operating cash flow taken as zero.",
                entity.name
            ));
        }
    }

    for adj in adjustments {
        if group.included_entities().all(|e| !adj.applies_to(&e.id)) {
            warnings.push(format!(
                "Adjustment '{}' targets entity '{}', which is not included; ignored.",
                adj.id, adj.entity_id
            ));
        }
        if adj.is_overridden {
            warnings.push(format!(
                "Adjustment '{}' was overridden by {}; recorded impact {} retained.",
                adj.id,
                adj.overridden_by.as_deref().unwrap_or("an analyst"),
                adj.impact
            ));
        }
    }

    for calc in &result.entity_breakdown {
        if calc.status == DscrStatus::NoDebtService {
            warnings.push(format!(
                "{} has no debt service; coverage reported at the {COVERAGE_CAP}x cap.",
                calc.entity_name
            ));
        }
    }

    if !group.guarantors.is_empty() && !policy.include_guarantor_cash_flow {
        warnings.push("Guarantor cash flow and debt are excluded by policy.".into());
    }

    if result.status == DscrStatus::NoDebtService {
        warnings.push("Group has no debt service; global coverage is not a policy pass.".into());
    } else if result.requires_exception {
        warnings.push(format!(
            "Global DSCR {}x is below {}x; a policy exception is required.",
            result.global_dscr.round_dp(2),
            policy.exception_threshold()
        ));
    }

    for w in &warnings {
        tracing::warn!(borrower_group = %group.id, "{w}");
    }

    warnings
}
