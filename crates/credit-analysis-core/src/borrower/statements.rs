use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodType {
    /// Fiscal year
    FY,
    /// Trailing twelve months
    TTM,
    Interim,
}

/// One reporting period for an entity.
///
/// Only `cash_flow.operating_cash_flow` feeds coverage; the remaining lines
/// are carried for spreading and memo output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPeriod {
    pub id: String,
    pub entity_id: String,
    pub period_type: PeriodType,
    pub period_end: NaiveDate,
    pub year: i32,
    #[serde(default)]
    pub balance_sheet: BalanceSheet,
    #[serde(default)]
    pub income_statement: IncomeStatement,
    #[serde(default)]
    pub cash_flow: CashFlowStatement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSheet {
    // Assets
    pub cash: Money,
    pub accounts_receivable: Money,
    pub inventory: Money,
    pub other_current_assets: Money,
    pub total_current_assets: Money,
    pub fixed_assets: Money,
    pub accumulated_depreciation: Money,
    pub net_fixed_assets: Money,
    pub other_assets: Money,
    pub total_assets: Money,
    // Liabilities
    pub accounts_payable: Money,
    #[serde(alias = "current_portion_ltd")]
    pub current_portion_long_term_debt: Money,
    pub other_current_liabilities: Money,
    pub total_current_liabilities: Money,
    pub long_term_debt: Money,
    pub other_liabilities: Money,
    pub total_liabilities: Money,
    // Equity
    pub common_stock: Money,
    pub retained_earnings: Money,
    pub total_equity: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeStatement {
    pub revenue: Money,
    pub cost_of_goods_sold: Money,
    pub gross_profit: Money,
    pub operating_expenses: Money,
    pub officer_compensation: Money,
    pub depreciation: Money,
    pub amortization: Money,
    pub interest_expense: Money,
    pub other_income: Money,
    pub other_expense: Money,
    pub net_income: Money,
    pub ebitda: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowStatement {
    pub net_income: Money,
    pub depreciation: Money,
    pub amortization: Money,
    pub change_in_ar: Money,
    pub change_in_inventory: Money,
    pub change_in_ap: Money,
    pub other_operating: Money,
    pub operating_cash_flow: Money,
    pub capital_expenditures: Money,
    pub other_investing: Money,
    pub investing_cash_flow: Money,
    pub debt_proceeds: Money,
    pub debt_payments: Money,
    pub distributions: Money,
    pub other_financing: Money,
    pub financing_cash_flow: Money,
    pub net_cash_flow: Money,
}
