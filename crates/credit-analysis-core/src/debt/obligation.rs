use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};
use crate::{CreditAnalysisError, CreditAnalysisResult};

pub(crate) const MONTHS_PER_YEAR: Money = dec!(12);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DebtType {
    Term,
    Revolver,
    /// Line of credit
    Loc,
    Mortgage,
    Auto,
    Other,
}

/// One loan or line of credit owed by an entity or guarantor.
///
/// `current_balance <= original_balance` is expected of upstream data entry
/// and is not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtObligation {
    pub id: String,
    pub lender: String,
    pub debt_type: DebtType,
    pub original_balance: Money,
    pub current_balance: Money,
    pub interest_rate: Percent,
    pub monthly_payment: Money,
    pub maturity_date: NaiveDate,
    /// Hypothetical new debt rather than an existing obligation.
    #[serde(default)]
    pub is_proposed: bool,
}

impl DebtObligation {
    pub fn annual_payment(&self) -> Money {
        self.monthly_payment * MONTHS_PER_YEAR
    }

    pub fn checked_annual_payment(&self) -> CreditAnalysisResult<Money> {
        self.monthly_payment
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or_else(|| CreditAnalysisError::InvalidInput {
                field: format!("debts[{}].monthly_payment", self.id),
                reason: "Annualized payment exceeds the representable decimal range.".into(),
            })
    }
}
