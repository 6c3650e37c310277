use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CreditAnalysisError, CreditAnalysisResult};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Interest rates on loan records, expressed as percentages (6.25 = 6.25%).
pub type Percent = Decimal;

/// Coverage multiples (e.g., 1.40x DSCR)
pub type Multiple = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Left-to-right sum from zero, reporting overflow as `InvalidInput` on
/// `field` rather than panicking. Matches the order of `Iterator::sum`.
pub fn checked_sum<I>(values: I, field: &str) -> CreditAnalysisResult<Money>
where
    I: IntoIterator<Item = Money>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or_else(|| CreditAnalysisError::InvalidInput {
            field: field.to_string(),
            reason: "Total exceeds the representable decimal range.".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_checked_sum_matches_plain_sum() {
        let values = [dec!(1.5), dec!(-0.25), dec!(100)];
        assert_eq!(checked_sum(values, "v").unwrap(), values.iter().copied().sum::<Money>());
        assert_eq!(checked_sum(Vec::new(), "v").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_checked_sum_reports_overflow() {
        match checked_sum([Decimal::MAX, Decimal::ONE], "debts").unwrap_err() {
            CreditAnalysisError::InvalidInput { field, .. } => assert_eq!(field, "debts"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
