//! Debt-service coverage: per-entity classification and the global ratio
//! across a borrower group.

pub mod classifier;
pub mod global;
pub mod policy;
pub mod pro_forma;

pub use classifier::{
    calculate_entity_dscr, classify, coverage_ratio, entity_dscr, evaluate, DscrCalculation,
    DscrStatus, EntityDscrInput, COVERAGE_CAP,
};
pub use global::{aggregate_global_dscr, calculate_global_dscr, GlobalDscr, GlobalDscrInput};
pub use policy::DscrPolicy;
pub use pro_forma::{calculate_pro_forma_dscr, ProFormaInput, ProFormaOutput};
