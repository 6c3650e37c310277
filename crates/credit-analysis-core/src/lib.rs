pub mod borrower;
pub mod cash_flow;
pub mod debt;
pub mod error;
pub mod types;

#[cfg(feature = "dscr")]
pub mod dscr;

#[cfg(feature = "fixtures")]
pub mod fixtures;

pub use error::CreditAnalysisError;
pub use types::*;

/// Standard result type for all credit-analysis operations
pub type CreditAnalysisResult<T> = Result<T, CreditAnalysisError>;
