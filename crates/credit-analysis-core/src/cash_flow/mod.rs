//! Normalized entity cash flow: the most recent operating cash flow plus the
//! adjustments scoped to the entity.

pub mod adjustments;
pub mod extractor;

pub use adjustments::{
    calculate_adjustment_summary, summarize_adjustments, Adjustment, AdjustmentCategory,
    AdjustmentSummary,
};
pub use extractor::{current_period, extract_entity_cash_flow, EntityCashFlow};
