use serde::{Deserialize, Serialize};

use crate::debt::DebtObligation;
use crate::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuarantorType {
    Individual,
    Entity,
}

/// An individual or entity providing a personal guarantee.
///
/// Guarantors carry no period financials; `personal_cash_flow` is a single
/// pre-computed annual figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guarantor {
    pub id: String,
    pub name: String,
    pub guarantor_type: GuarantorType,
    pub ownership_percent: Money,
    pub personal_cash_flow: Money,
    #[serde(default)]
    pub personal_debt: Vec<DebtObligation>,
}
