use serde::{Deserialize, Serialize};

use super::statements::FinancialPeriod;
use crate::debt::DebtObligation;
use crate::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    Operating,
    Holding,
    RealEstate,
}

/// A legal borrowing entity within a borrower group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub entity_type: EntityType,
    /// Ownership held by the group, 0–100.
    pub ownership_percent: Money,
    /// Whether the entity counts toward the global ratio.
    #[serde(default = "default_include")]
    pub include_in_global: bool,
    #[serde(default)]
    pub financials: Vec<FinancialPeriod>,
    #[serde(default)]
    pub debts: Vec<DebtObligation>,
}

fn default_include() -> bool {
    true
}

impl Entity {
    pub fn has_financials(&self) -> bool {
        !self.financials.is_empty()
    }
}
