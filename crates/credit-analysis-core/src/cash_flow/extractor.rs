use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::adjustments::Adjustment;
use crate::borrower::{Entity, FinancialPeriod};
use crate::types::Money;

/// Normalized annual cash flow available to service one entity's debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCashFlow {
    pub entity_id: String,
    pub period_end: Option<NaiveDate>,
    pub operating_cash_flow: Money,
    pub adjustment_total: Money,
    pub normalized_cash_flow: Money,
    /// False when the entity has no financial periods to draw from.
    pub computable: bool,
}

/// The most recent period by `period_end`. On a tie the later entry in the
/// list wins, so a restated period appended after the original replaces it.
pub fn current_period(entity: &Entity) -> Option<&FinancialPeriod> {
    // max_by_key returns the last of equal maxima.
    entity.financials.iter().max_by_key(|p| p.period_end)
}

/// Operating cash flow from the current period plus the impact of every
/// adjustment scoped to this entity. Adjustments for other entities are
/// ignored. No periods yields zero and `computable = false`.
pub fn extract_entity_cash_flow(entity: &Entity, adjustments: &[Adjustment]) -> EntityCashFlow {
    let period = current_period(entity);
    let operating_cash_flow = period
        .map(|p| p.cash_flow.operating_cash_flow)
        .unwrap_or(Decimal::ZERO);

    let adjustment_total: Money = adjustments
        .iter()
        .filter(|a| a.applies_to(&entity.id))
        .map(|a| a.impact)
        .sum();

    EntityCashFlow {
        entity_id: entity.id.clone(),
        period_end: period.map(|p| p.period_end),
        operating_cash_flow,
        adjustment_total,
        normalized_cash_flow: operating_cash_flow + adjustment_total,
        computable: period.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::borrower::{CashFlowStatement, EntityType, PeriodType};
    use crate::cash_flow::AdjustmentCategory;
    use chrono::Datelike;
    use rust_decimal_macros::dec;

    fn period(id: &str, end: NaiveDate, ocf: Decimal) -> FinancialPeriod {
        FinancialPeriod {
            id: id.into(),
            entity_id: "entity-1".into(),
            period_type: PeriodType::FY,
            period_end: end,
            year: end.year(),
            balance_sheet: Default::default(),
            income_statement: Default::default(),
            cash_flow: CashFlowStatement {
                operating_cash_flow: ocf,
                ..Default::default()
            },
        }
    }

    fn entity(financials: Vec<FinancialPeriod>) -> Entity {
        Entity {
            id: "entity-1".into(),
            name: "Smith Manufacturing LLC".into(),
            entity_type: EntityType::Operating,
            ownership_percent: dec!(100),
            include_in_global: true,
            financials,
            debts: vec![],
        }
    }

    fn adjustment(entity_id: &str, impact: Decimal) -> Adjustment {
        Adjustment {
            id: format!("adj-{impact}"),
            entity_id: entity_id.into(),
            category: AdjustmentCategory::Other,
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

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_picks_most_recent_period_regardless_of_order() {
        let e = entity(vec![
            period("fp-2", ymd(2022, 12, 31), dec!(412_000)),
            period("fp-1", ymd(2023, 12, 31), dec!(478_000)),
        ]);
        assert_eq!(current_period(&e).unwrap().id, "fp-1");

        let cf = extract_entity_cash_flow(&e, &[]);
        assert_eq!(cf.operating_cash_flow, dec!(478_000));
        assert_eq!(cf.normalized_cash_flow, dec!(478_000));
        assert_eq!(cf.period_end, Some(ymd(2023, 12, 31)));
        assert!(cf.computable);
    }

    #[test]
    fn test_tie_prefers_later_entry() {
        let e = entity(vec![
            period("original", ymd(2023, 12, 31), dec!(100)),
            period("restated", ymd(2023, 12, 31), dec!(200)),
        ]);
        assert_eq!(current_period(&e).unwrap().id, "restated");
    }

    #[test]
    fn test_adjustment_sign_convention() {
        let e = entity(vec![period("fp-1", ymd(2023, 12, 31), dec!(478_000))]);

        let up = extract_entity_cash_flow(&e, &[adjustment("entity-1", dec!(85_000))]);
        assert_eq!(up.normalized_cash_flow, dec!(563_000));

        let down = extract_entity_cash_flow(&e, &[adjustment("entity-1", dec!(-36_000))]);
        assert_eq!(down.normalized_cash_flow, dec!(442_000));
    }

    #[test]
    fn test_ignores_other_entities_adjustments() {
        let e = entity(vec![period("fp-1", ymd(2023, 12, 31), dec!(478_000))]);
        let cf = extract_entity_cash_flow(&e, &[adjustment("entity-2", dec!(50_000))]);
        assert_eq!(cf.adjustment_total, Decimal::ZERO);
        assert_eq!(cf.normalized_cash_flow, dec!(478_000));
    }

    #[test]
    fn test_no_periods_is_not_computable() {
        let e = entity(vec![]);
        let cf = extract_entity_cash_flow(&e, &[adjustment("entity-1", dec!(10_000))]);
        assert!(!cf.computable);
        assert_eq!(cf.operating_cash_flow, Decimal::ZERO);
        assert_eq!(cf.period_end, None);
        // Adjustments still apply on top of the zero base.
        assert_eq!(cf.normalized_cash_flow, dec!(10_000));
    }
}
