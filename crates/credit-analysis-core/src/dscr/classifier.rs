use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::policy::DscrPolicy;
use crate::types::*;
use crate::CreditAnalysisResult;

/// Ceiling on reported coverage in either direction. Also the value reported
/// when there is no debt service but cash flow is positive.
pub const COVERAGE_CAP: Multiple = dec!(999);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DscrStatus {
    Pass,
    Marginal,
    Fail,
    /// Positive cash flow with nothing to service. Not a policy pass.
    NoDebtService,
}

impl DscrStatus {
    pub fn meets_minimum(self) -> bool {
        matches!(self, Self::Pass | Self::Marginal | Self::NoDebtService)
    }
}

impl std::fmt::Display for DscrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pass => "pass",
            Self::Marginal => "marginal",
            Self::Fail => "fail",
            Self::NoDebtService => "no_debt_service",
        };
        write!(f, "{}", s)
    }
}

/// Coverage result for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DscrCalculation {
    pub entity_id: String,
    pub entity_name: String,
    pub cash_flow: Money,
    pub debt_service: Money,
    pub dscr: Multiple,
    pub status: DscrStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDscrInput {
    #[serde(default)]
    pub entity_id: String,
    #[serde(default)]
    pub entity_name: String,
    pub cash_flow: Money,
    pub debt_service: Money,
    #[serde(default)]
    pub policy: DscrPolicy,
}

// ---------------------------------------------------------------------------
// Pure classification
// ---------------------------------------------------------------------------

/// cash_flow / debt_service, clamped to `[-COVERAGE_CAP, COVERAGE_CAP]`.
/// Zero debt service resolves to the cap for positive cash flow and zero
/// otherwise; an unrepresentable quotient saturates at the signed cap.
pub fn coverage_ratio(cash_flow: Money, debt_service: Money) -> Multiple {
    if debt_service.is_zero() {
        return if cash_flow > Decimal::ZERO {
            COVERAGE_CAP
        } else {
            Decimal::ZERO
        };
    }
    match cash_flow.checked_div(debt_service) {
        Some(ratio) => ratio.clamp(-COVERAGE_CAP, COVERAGE_CAP),
        None if cash_flow.is_sign_negative() != debt_service.is_sign_negative() => -COVERAGE_CAP,
        None => COVERAGE_CAP,
    }
}

/// Strict less-than, first match wins: below the minimum fails, below the
/// marginal line is marginal, everything else passes. Thresholds are taken
/// as given.
pub fn classify(dscr: Multiple, policy: &DscrPolicy) -> DscrStatus {
    if dscr < policy.minimum_dscr {
        DscrStatus::Fail
    } else if dscr < policy.marginal_dscr {
        DscrStatus::Marginal
    } else {
        DscrStatus::Pass
    }
}

pub fn evaluate(cash_flow: Money, debt_service: Money, policy: &DscrPolicy) -> (Multiple, DscrStatus) {
    let dscr = coverage_ratio(cash_flow, debt_service);
    let status = if debt_service.is_zero() && cash_flow > Decimal::ZERO {
        DscrStatus::NoDebtService
    } else {
        classify(dscr, policy)
    };
    (dscr, status)
}

pub fn entity_dscr(
    entity_id: &str,
    entity_name: &str,
    cash_flow: Money,
    debt_service: Money,
    policy: &DscrPolicy,
) -> DscrCalculation {
    let (dscr, status) = evaluate(cash_flow, debt_service, policy);
    tracing::debug!(entity_id, %cash_flow, %debt_service, %dscr, %status, "entity coverage evaluated");
    DscrCalculation {
        entity_id: entity_id.to_string(),
        entity_name: entity_name.to_string(),
        cash_flow,
        debt_service,
        dscr,
        status,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify a single (cash flow, debt service) pair against a policy.
pub fn calculate_entity_dscr(
    input: &EntityDscrInput,
) -> CreditAnalysisResult<ComputationOutput<DscrCalculation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.policy.validate()?;

    let result = entity_dscr(
        &input.entity_id,
        &input.entity_name,
        input.cash_flow,
        input.debt_service,
        &input.policy,
    );

    if result.status == DscrStatus::NoDebtService {
        warnings.push(format!(
            "No debt service; coverage reported at the {COVERAGE_CAP}x cap."
        ));
    }
    if input.debt_service < Decimal::ZERO {
        warnings.push("Debt service is negative; the ratio has no credit meaning.".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "minimum_dscr": input.policy.minimum_dscr,
        "marginal_dscr": input.policy.marginal_dscr,
        "zero_debt_service": "no_debt_service status, 999x cap",
    });

    Ok(with_metadata(
        "DSCR (cash flow / annual debt service)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
