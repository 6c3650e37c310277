pub mod adjustments;
pub mod debt;
pub mod dscr;
