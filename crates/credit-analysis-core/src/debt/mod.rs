//! Debt obligations, annual debt service and proposed-loan amortization.

pub mod amortization;
pub mod obligation;
pub mod service;

pub use amortization::{calculate_loan_payment, monthly_payment, ProposedLoan, ProposedLoanPayment};
pub use obligation::{DebtObligation, DebtType};
pub use service::{
    annual_debt_service, calculate_debt_service, checked_annual_debt_service, DebtServiceBasis,
    DebtServiceInput, DebtServiceOutput,
};
