use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use credit_analysis_core::cash_flow::{self, Adjustment};

use crate::input;

/// Arguments for the adjustment summary
#[derive(Args)]
pub struct AdjustmentsArgs {
    /// Path to JSON/YAML input: a list of adjustments, or an object with `adjustments`
    #[arg(long)]
    pub input: Option<String>,

    /// Only summarise adjustments for this entity
    #[arg(long)]
    pub entity_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AdjustmentsInput {
    List(Vec<Adjustment>),
    Wrapped { adjustments: Vec<Adjustment> },
}

pub fn run_adjustments(args: AdjustmentsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let parsed: AdjustmentsInput = input::load(args.input.as_deref(), "adjustment summary")?;
    let mut adjustments = match parsed {
        AdjustmentsInput::List(list) => list,
        AdjustmentsInput::Wrapped { adjustments } => adjustments,
    };
    if let Some(ref entity_id) = args.entity_id {
        adjustments.retain(|a| a.applies_to(entity_id));
    }

    let result = cash_flow::calculate_adjustment_summary(&adjustments)?;
    Ok(serde_json::to_value(result)?)
}
