use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Multiple;
use crate::{CreditAnalysisError, CreditAnalysisResult};

/// Institutional coverage thresholds. Missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DscrPolicy {
    /// Policy floor; anything below fails.
    pub minimum_dscr: Multiple,
    /// Coverage below this, but at or above the floor, is marginal.
    pub marginal_dscr: Multiple,
    /// Fold every guarantor's personal cash flow and debt into the global ratio.
    pub include_guarantor_cash_flow: bool,
    /// Global coverage below this needs a policy exception. Defaults to the floor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_exception_below: Option<Multiple>,
}

impl Default for DscrPolicy {
    fn default() -> Self {
        Self {
            minimum_dscr: dec!(1.25),
            marginal_dscr: dec!(1.35),
            include_guarantor_cash_flow: true,
            require_exception_below: None,
        }
    }
}

impl DscrPolicy {
    pub fn exception_threshold(&self) -> Multiple {
        self.require_exception_below.unwrap_or(self.minimum_dscr)
    }

    /// Reject threshold sets that would make classification misleading.
    /// Classification itself never calls this.
    pub fn validate(&self) -> CreditAnalysisResult<()> {
        if self.minimum_dscr < Decimal::ZERO {
            return Err(CreditAnalysisError::InvalidInput {
                field: "minimum_dscr".into(),
                reason: "Minimum DSCR cannot be negative.".into(),
            });
        }
        if self.marginal_dscr < self.minimum_dscr {
            return Err(CreditAnalysisError::InvalidInput {
                field: "marginal_dscr".into(),
                reason: format!(
                    "Marginal DSCR {}x is below the minimum {}x.",
                    self.marginal_dscr, self.minimum_dscr
                ),
            });
        }
        if let Some(t) = self.require_exception_below {
            if t < Decimal::ZERO {
                return Err(CreditAnalysisError::InvalidInput {
                    field: "require_exception_below".into(),
                    reason: "Exception threshold cannot be negative.".into(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_bank_settings() {
        let p = DscrPolicy::default();
        assert_eq!(p.minimum_dscr, dec!(1.25));
        assert_eq!(p.marginal_dscr, dec!(1.35));
        assert!(p.include_guarantor_cash_flow);
        assert_eq!(p.exception_threshold(), dec!(1.25));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let p = DscrPolicy {
            minimum_dscr: dec!(1.40),
            marginal_dscr: dec!(1.20),
            ..Default::default()
        };
        match p.validate().unwrap_err() {
            CreditAnalysisError::InvalidInput { field, .. } => assert_eq!(field, "marginal_dscr"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_equal_thresholds_allowed() {
        let p = DscrPolicy {
            minimum_dscr: dec!(1.25),
            marginal_dscr: dec!(1.25),
            ..Default::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let p: DscrPolicy = serde_json::from_str(r#"{"minimum_dscr": 1.20}"#).unwrap();
        assert_eq!(p.minimum_dscr, dec!(1.20));
        assert_eq!(p.marginal_dscr, dec!(1.35));
        assert!(p.include_guarantor_cash_flow);
    }
}
