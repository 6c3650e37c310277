//! Borrower group data model: the entities and guarantors underwritten
//! together, with their reporting periods.

pub mod entity;
pub mod group;
pub mod guarantor;
pub mod statements;

pub use entity::{Entity, EntityType};
pub use group::{AnalysisStatus, BorrowerGroup};
pub use guarantor::{Guarantor, GuarantorType};
pub use statements::{BalanceSheet, CashFlowStatement, FinancialPeriod, IncomeStatement, PeriodType};
