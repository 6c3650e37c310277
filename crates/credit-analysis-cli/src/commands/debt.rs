use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_analysis_core::debt::{self, DebtServiceBasis, DebtServiceInput, ProposedLoan};

use crate::input;

/// Arguments for annual debt service
#[derive(Args)]
pub struct DebtServiceArgs {
    /// Path to JSON/YAML input: obligations, basis
    #[arg(long)]
    pub input: Option<String>,

    /// Report pro forma debt service (existing plus proposed)
    #[arg(long)]
    pub pro_forma: bool,
}

/// Arguments for a proposed loan payment
#[derive(Args)]
pub struct LoanPaymentArgs {
    /// Loan amount
    #[arg(long)]
    pub amount: Decimal,

    /// Annual interest rate in percent (7.5 = 7.5%)
    #[arg(long)]
    pub rate: Decimal,

    /// Term in months
    #[arg(long)]
    pub term_months: u32,

    /// Entity that would carry the loan
    #[arg(long, default_value = "")]
    pub entity_id: String,
}

pub fn run_debt_service(args: DebtServiceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut ds_input: DebtServiceInput = input::load(args.input.as_deref(), "debt service")?;
    if args.pro_forma {
        ds_input.basis = DebtServiceBasis::ProForma;
    }

    let result = debt::calculate_debt_service(&ds_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_loan_payment(args: LoanPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = ProposedLoan {
        entity_id: args.entity_id,
        lender: None,
        amount: args.amount,
        interest_rate: args.rate,
        term_months: args.term_months,
    };

    let result = debt::calculate_loan_payment(&loan)?;
    Ok(serde_json::to_value(result)?)
}
