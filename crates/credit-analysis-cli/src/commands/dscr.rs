use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_analysis_core::dscr::{
    self, DscrPolicy, EntityDscrInput, GlobalDscrInput, ProFormaInput,
};
use credit_analysis_core::debt::ProposedLoan;
use credit_analysis_core::fixtures;

use crate::input;

/// Policy threshold overrides shared by the DSCR commands
#[derive(Args, Debug, Default)]
pub struct PolicyArgs {
    /// Policy minimum DSCR (default 1.25)
    #[arg(long)]
    pub minimum_dscr: Option<Decimal>,

    /// Marginal DSCR line (default 1.35)
    #[arg(long)]
    pub marginal_dscr: Option<Decimal>,

    /// Global DSCR below which a policy exception is required
    #[arg(long)]
    pub require_exception_below: Option<Decimal>,

    /// Leave guarantor cash flow and personal debt out of the global ratio
    #[arg(long)]
    pub exclude_guarantors: bool,
}

impl PolicyArgs {
    /// Layer command-line overrides on top of the policy from the input file.
    pub fn apply(&self, policy: &mut DscrPolicy) {
        if let Some(v) = self.minimum_dscr {
            policy.minimum_dscr = v;
        }
        if let Some(v) = self.marginal_dscr {
            policy.marginal_dscr = v;
        }
        if let Some(v) = self.require_exception_below {
            policy.require_exception_below = Some(v);
        }
        if self.exclude_guarantors {
            policy.include_guarantor_cash_flow = false;
        }
    }

    fn policy(&self) -> DscrPolicy {
        let mut policy = DscrPolicy::default();
        self.apply(&mut policy);
        policy
    }
}

/// Arguments for global DSCR across a borrower group
#[derive(Args)]
pub struct GlobalDscrArgs {
    /// Path to JSON/YAML input: borrower_group, adjustments, policy
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Arguments for a single entity DSCR classification
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EntityDscrArgs {
    /// Annual cash flow available for debt service
    #[arg(long, alias = "cf")]
    pub cash_flow: Decimal,

    /// Annual debt service
    #[arg(long, alias = "ds")]
    pub debt_service: Decimal,

    /// Entity name shown in the output
    #[arg(long, default_value = "")]
    pub name: String,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Arguments for pro forma DSCR with proposed loans
#[derive(Args)]
pub struct ProFormaArgs {
    /// Path to JSON/YAML input: borrower_group, adjustments, policy, proposed_loans
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Arguments for the built-in sample borrower group
#[derive(Args)]
pub struct DemoArgs {
    /// Apply the sample normalization adjustments
    #[arg(long)]
    pub with_adjustments: bool,

    /// Model a proposed loan of this amount on Smith Manufacturing
    #[arg(long)]
    pub proposed_amount: Option<Decimal>,

    /// Proposed loan rate in percent
    #[arg(long, default_value = "7.5")]
    pub proposed_rate: Decimal,

    /// Proposed loan term in months
    #[arg(long, default_value_t = 84)]
    pub proposed_term_months: u32,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

pub fn run_global_dscr(args: GlobalDscrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut dscr_input: GlobalDscrInput = input::load(args.input.as_deref(), "global DSCR")?;
    args.policy.apply(&mut dscr_input.policy);

    let result = dscr::calculate_global_dscr(&dscr_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_entity_dscr(args: EntityDscrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let entity_input = EntityDscrInput {
        entity_id: String::new(),
        entity_name: args.name.clone(),
        cash_flow: args.cash_flow,
        debt_service: args.debt_service,
        policy: args.policy.policy(),
    };

    let result = dscr::calculate_entity_dscr(&entity_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_pro_forma(args: ProFormaArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut pf_input: ProFormaInput = input::load(args.input.as_deref(), "pro forma DSCR")?;
    args.policy.apply(&mut pf_input.policy);

    let result = dscr::calculate_pro_forma_dscr(&pf_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_demo(args: DemoArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let borrower_group = fixtures::smith_holdings();
    let adjustments = if args.with_adjustments {
        fixtures::smith_holdings_adjustments()
    } else {
        Vec::new()
    };
    let policy = args.policy.policy();

    match args.proposed_amount {
        Some(amount) => {
            let pf_input = ProFormaInput {
                borrower_group,
                adjustments,
                policy,
                proposed_loans: vec![ProposedLoan {
                    entity_id: fixtures::SMITH_MANUFACTURING.to_string(),
                    lender: None,
                    amount,
                    interest_rate: args.proposed_rate,
                    term_months: args.proposed_term_months,
                }],
                as_of: None,
            };
            Ok(serde_json::to_value(dscr::calculate_pro_forma_dscr(&pf_input)?)?)
        }
        None => {
            let dscr_input = GlobalDscrInput {
                borrower_group,
                adjustments,
                policy,
            };
            Ok(serde_json::to_value(dscr::calculate_global_dscr(&dscr_input)?)?)
        }
    }
}
