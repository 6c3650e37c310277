use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::*;
use crate::CreditAnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentCategory {
    NonRecurring,
    OwnerCompensation,
    RelatedParty,
    OneTime,
    RentNormalization,
    Other,
}

/// A normalization entry against one entity's reported cash flow.
///
/// A positive `impact` raises normalized cash flow. Override fields record
/// analyst review; they never change `impact`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub id: String,
    pub entity_id: String,
    pub category: AdjustmentCategory,
    pub description: String,
    pub original_value: Money,
    pub adjusted_value: Money,
    pub impact: Money,
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub is_overridden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridden_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridden_at: Option<DateTime<Utc>>,
}

impl Adjustment {
    pub fn applies_to(&self, entity_id: &str) -> bool {
        self.entity_id == entity_id
    }

    pub fn is_add_back(&self) -> bool {
        self.impact > Decimal::ZERO
    }

    /// Deductions nobody has signed off on yet.
    pub fn is_pending_review(&self) -> bool {
        !self.is_overridden && self.impact < Decimal::ZERO
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSummary {
    pub total_impact: Money,
    pub add_backs: Money,
    pub deductions: Money,
    pub by_category: BTreeMap<AdjustmentCategory, Money>,
    pub overridden_count: usize,
    pub pending_review: usize,
    pub count: usize,
}

pub fn summarize_adjustments(adjustments: &[Adjustment]) -> AdjustmentSummary {
    let mut by_category: BTreeMap<AdjustmentCategory, Money> = BTreeMap::new();
    let mut add_backs = Decimal::ZERO;
    let mut deductions = Decimal::ZERO;

    for adj in adjustments {
        *by_category.entry(adj.category).or_insert(Decimal::ZERO) += adj.impact;
        if adj.is_add_back() {
            add_backs += adj.impact;
        } else {
            deductions += adj.impact;
        }
    }

    AdjustmentSummary {
        total_impact: add_backs + deductions,
        add_backs,
        deductions,
        by_category,
        overridden_count: adjustments.iter().filter(|a| a.is_overridden).count(),
        pending_review: adjustments.iter().filter(|a| a.is_pending_review()).count(),
        count: adjustments.len(),
    }
}

/// Adjustment summary wrapped with review warnings.
pub fn calculate_adjustment_summary(
    adjustments: &[Adjustment],
) -> CreditAnalysisResult<ComputationOutput<AdjustmentSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for adj in adjustments {
        if adj.is_overridden && adj.override_reason.is_none() {
            warnings.push(format!("Adjustment '{}' is overridden without a reason.", adj.id));
        }
        if adj.is_pending_review() {
            warnings.push(format!(
                "Adjustment '{}' reduces cash flow by {} and awaits review.",
                adj.id,
                -adj.impact
            ));
        }
    }

    // Every partial sum in the summary lies between these two totals.
    checked_sum(
        adjustments.iter().filter(|a| a.is_add_back()).map(|a| a.impact),
        "adjustments.impact",
    )?;
    checked_sum(
        adjustments.iter().filter(|a| !a.is_add_back()).map(|a| a.impact),
        "adjustments.impact",
    )?;

    let summary = summarize_adjustments(adjustments);

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "sign_convention": "positive impact increases normalized cash flow",
        "overrides_change_impact": false,
    });

    Ok(with_metadata(
        "Cash flow normalization summary",
        &assumptions,
        warnings,
        elapsed,
        summary,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn adjustment(id: &str, category: AdjustmentCategory, impact: Decimal) -> Adjustment {
        Adjustment {
            id: id.into(),
            entity_id: "entity-1".into(),
            category,
            description: String::new(),
            original_value: Decimal::ZERO,
            adjusted_value: Decimal::ZERO,
            impact,
            rule: String::new(),
            is_overridden: false,
            override_reason: None,
            overridden_by: None,
            overridden_at: None,
        }
    }

    #[test]
    fn test_summary_totals_and_categories() {
        let mut rent = adjustment("a4", AdjustmentCategory::RelatedParty, dec!(-36_000));
        rent.is_overridden = true;
        let adjustments = vec![
            adjustment("a1", AdjustmentCategory::NonRecurring, dec!(85_000)),
            adjustment("a3", AdjustmentCategory::NonRecurring, dec!(42_000)),
            rent,
            adjustment("a5", AdjustmentCategory::OneTime, dec!(-28_000)),
        ];
        let s = summarize_adjustments(&adjustments);

        assert_eq!(s.total_impact, dec!(63_000));
        assert_eq!(s.add_backs, dec!(127_000));
        assert_eq!(s.deductions, dec!(-64_000));
        assert_eq!(s.by_category[&AdjustmentCategory::NonRecurring], dec!(127_000));
        assert_eq!(s.by_category[&AdjustmentCategory::RelatedParty], dec!(-36_000));
        assert_eq!(s.overridden_count, 1);
        // Only the un-overridden deduction is pending.
        assert_eq!(s.pending_review, 1);
        assert_eq!(s.count, 4);
    }

    #[test]
    fn test_summary_envelope_flags_pending_deductions() {
        let adjustments = vec![
            adjustment("a1", AdjustmentCategory::NonRecurring, dec!(85_000)),
            adjustment("a5", AdjustmentCategory::OneTime, dec!(-28_000)),
        ];
        let out = calculate_adjustment_summary(&adjustments).unwrap();
        assert_eq!(out.result.total_impact, dec!(57_000));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("a5"));
    }

    #[test]
    fn test_summary_envelope_rejects_unrepresentable_total() {
        let adjustments = vec![
            adjustment("a1", AdjustmentCategory::NonRecurring, Decimal::MAX),
            adjustment("a2", AdjustmentCategory::OneTime, dec!(1)),
        ];
        assert!(calculate_adjustment_summary(&adjustments).is_err());
    }

    #[test]
    fn test_empty_summary() {
        let s = summarize_adjustments(&[]);
        assert_eq!(s.total_impact, Decimal::ZERO);
        assert!(s.by_category.is_empty());
        assert_eq!(s.count, 0);
    }

    #[test]
    fn test_category_kebab_case() {
        let json = serde_json::to_string(&AdjustmentCategory::OwnerCompensation).unwrap();
        assert_eq!(json, "\"owner-compensation\"");
    }
}
